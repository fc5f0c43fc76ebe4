//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

/// A command-stream line that could not be turned into a directive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectiveError {
    /// Fewer arguments than the directive requires
    #[error("line {line}: {directive} expects {expected} arguments, got {found}")]
    MissingArguments {
        line: usize,
        directive: &'static str,
        expected: usize,
        found: usize,
    },

    /// An argument that does not parse as the required number
    #[error("line {line}: {directive} argument {index} is not a valid number: '{token}'")]
    InvalidNumber {
        line: usize,
        directive: &'static str,
        index: usize,
        token: String,
    },
}

/// Errors raised by the simulation pipeline and its tools
#[derive(Debug, Error)]
pub enum NebulaError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid noise texture: {width}x{height} with {len} bytes")]
    InvalidNoise { width: u32, height: u32, len: usize },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, NebulaError>;
