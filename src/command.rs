//! Command-stream directives.
//!
//! One directive per line, whitespace separated. Lines whose first token starts with `#`
//! are comments and are echoed by the interpreter.

use std::str::FromStr;

use glam::Vec3;

use crate::error::DirectiveError;
use crate::particle::Particle;

/// Arguments of a SIMULATE directive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulate {
    pub iterations: u32,
    pub step_sample_rate: u32,
    pub damping: f32,
    pub noisy: f32,
    pub fuzz: f32,
}

/// A parsed command-stream line
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Blank line
    Empty,

    /// `# ...`, kept verbatim
    Comment(String),

    /// `PARTICLE x y vx vy`
    Particle(Particle),

    /// `COLOUR r g b`
    Colour(Vec3),

    /// `SIMULATE iterations stepSampleRate damping noisy fuzz`
    Simulate(Simulate),

    /// `TONEMAP exposure`
    Tonemap { exposure: f32 },

    /// Any other leading token (e.g. the `END` markers written by script generators)
    Unknown(String),
}

/// Typed access to a directive's argument tokens
struct Args<'a> {
    line: usize,
    directive: &'static str,
    tokens: Vec<&'a str>,
}

impl<'a> Args<'a> {
    fn new(
        line: usize,
        directive: &'static str,
        expected: usize,
        tokens: impl Iterator<Item = &'a str>,
    ) -> Result<Self, DirectiveError> {
        let tokens: Vec<&str> = tokens.collect();
        if tokens.len() < expected {
            return Err(DirectiveError::MissingArguments {
                line,
                directive,
                expected,
                found: tokens.len(),
            });
        }
        Ok(Self {
            line,
            directive,
            tokens,
        })
    }

    fn get<T: FromStr>(&self, index: usize) -> Result<T, DirectiveError> {
        let token = self.tokens[index];
        token.parse().map_err(|_| DirectiveError::InvalidNumber {
            line: self.line,
            directive: self.directive,
            index,
            token: token.to_string(),
        })
    }
}

impl Directive {
    /// Parse one line; `line` is the 1-based line number used in errors
    ///
    /// Trailing tokens beyond a directive's arguments are ignored.
    pub fn parse(line: usize, text: &str) -> Result<Self, DirectiveError> {
        let mut tokens = text.split_whitespace();
        let Some(head) = tokens.next() else {
            return Ok(Directive::Empty);
        };

        if head.starts_with('#') {
            return Ok(Directive::Comment(text.to_string()));
        }

        let directive = match head {
            "PARTICLE" => {
                let args = Args::new(line, "PARTICLE", 4, tokens)?;
                Directive::Particle(Particle::new(
                    args.get(0)?,
                    args.get(1)?,
                    args.get(2)?,
                    args.get(3)?,
                ))
            }
            "COLOUR" => {
                let args = Args::new(line, "COLOUR", 3, tokens)?;
                Directive::Colour(Vec3::new(args.get(0)?, args.get(1)?, args.get(2)?))
            }
            "SIMULATE" => {
                let args = Args::new(line, "SIMULATE", 5, tokens)?;
                Directive::Simulate(Simulate {
                    iterations: args.get(0)?,
                    step_sample_rate: args.get(1)?,
                    damping: args.get(2)?,
                    noisy: args.get(3)?,
                    fuzz: args.get(4)?,
                })
            }
            "TONEMAP" => {
                let args = Args::new(line, "TONEMAP", 1, tokens)?;
                Directive::Tonemap {
                    exposure: args.get(0)?,
                }
            }
            other => Directive::Unknown(other.to_string()),
        };

        Ok(directive)
    }
}
