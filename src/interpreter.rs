//! Command-stream interpreter.
//!
//! Owns the simulation state for one run: the noise field, the HDR buffer, the current
//! parameters and the PRNG. Directives are applied strictly in stream order.

use std::io::{BufRead, Write};

use crate::command::{Directive, Simulate};
use crate::error::Result;
use crate::hdr::HdrBuffer;
use crate::noise::NoiseField;
use crate::params::{ParticlePolicy, PipelineConfig, SimulationParams};
use crate::particle::{advect, Fate, Particle};
use crate::prng::Prng;
use crate::tonemap::{tonemap, Rgba8Buffer};

/// Counters gathered over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub particles: u64,
    pub deaths: u64,
    pub splats: u64,
    pub skipped_lines: u64,
}

/// How the stream ended
#[derive(Debug)]
pub enum Outcome {
    /// A TONEMAP directive was reached
    Tonemapped(Rgba8Buffer),

    /// Input ran out before any TONEMAP
    EndOfStream,
}

/// Applies directives to the simulation state; status lines go to `status`
pub struct Interpreter<W: Write> {
    field: NoiseField,
    hdr: HdrBuffer,
    params: SimulationParams,
    rng: Prng,
    config: PipelineConfig,
    pending: Vec<Particle>,
    stats: RunStats,
    status: W,
}

impl<W: Write> Interpreter<W> {
    /// Create an interpreter with an HDR buffer sized to `field`
    pub fn new(field: NoiseField, config: PipelineConfig, status: W) -> Self {
        let hdr = HdrBuffer::zeroed(field.width(), field.height());
        Self {
            field,
            hdr,
            params: SimulationParams::default(),
            rng: Prng::new(config.seed),
            config,
            pending: Vec::new(),
            stats: RunStats::default(),
            status,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn hdr(&self) -> &HdrBuffer {
        &self.hdr
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Particles queued under the batched policy
    pub fn pending(&self) -> &[Particle] {
        &self.pending
    }

    /// Read directives until TONEMAP or end of input
    ///
    /// Lines are raw bytes; anything that is not UTF-8 is decoded lossily so a stray
    /// Latin-1 comment cannot abort the run.
    pub fn run(&mut self, commands: impl BufRead) -> Result<Outcome> {
        for (index, line) in commands.split(b'\n').enumerate() {
            let raw = line?;
            let bytes = raw.strip_suffix(b"\r").unwrap_or(&raw[..]);
            let line = String::from_utf8_lossy(bytes);
            let directive = match Directive::parse(index + 1, &line) {
                Ok(directive) => directive,
                Err(e) => {
                    log::warn!("Skipping directive: {}", e);
                    self.stats.skipped_lines += 1;
                    continue;
                }
            };

            if let Some(output) = self.apply(directive)? {
                return Ok(Outcome::Tonemapped(output));
            }
        }

        if !self.pending.is_empty() {
            log::warn!(
                "{} queued particles discarded: stream ended without SIMULATE or TONEMAP",
                self.pending.len()
            );
        }
        Ok(Outcome::EndOfStream)
    }

    /// Apply one directive; returns the tonemapped image on TONEMAP
    pub fn apply(&mut self, directive: Directive) -> Result<Option<Rgba8Buffer>> {
        match directive {
            Directive::Empty => {}
            Directive::Comment(text) => writeln!(self.status, "{}", text)?,
            Directive::Particle(particle) => match self.config.policy {
                ParticlePolicy::Immediate => self.advect(particle),
                ParticlePolicy::Batched => self.pending.push(particle),
            },
            Directive::Colour(colour) => self.params.colour = colour,
            Directive::Simulate(simulate) => self.simulate(simulate)?,
            Directive::Tonemap { exposure } => return self.tonemap(exposure).map(Some),
            Directive::Unknown(token) => {
                log::debug!("Ignoring unknown directive '{}'", token);
                self.stats.skipped_lines += 1;
            }
        }
        Ok(None)
    }

    fn simulate(&mut self, s: Simulate) -> Result<()> {
        self.params.iterations = s.iterations;
        self.params.step_sample_rate = s.step_sample_rate;
        self.params.damping = s.damping;
        self.params.noisy = s.noisy;
        self.params.fuzz = s.fuzz;
        self.rng.reset();

        writeln!(
            self.status,
            "# Simulate: {} {} {:.6} {:.6} {:.6}",
            s.iterations, s.step_sample_rate, s.damping, s.noisy, s.fuzz
        )?;

        if self.config.policy == ParticlePolicy::Batched {
            self.flush_pending();
        }
        Ok(())
    }

    fn tonemap(&mut self, exposure: f32) -> Result<Rgba8Buffer> {
        self.flush_pending();
        writeln!(self.status, "# Tonemap: {:.6}", exposure)?;

        log::info!(
            "Advected {} particles ({} died early, {} splats)",
            self.stats.particles,
            self.stats.deaths,
            self.stats.splats
        );
        Ok(tonemap(&self.hdr, exposure, self.config.workers))
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        log::debug!("Advecting {} queued particles", self.pending.len());
        for particle in std::mem::take(&mut self.pending) {
            self.advect(particle);
        }
    }

    fn advect(&mut self, mut particle: Particle) {
        let result = advect(
            &mut particle,
            &self.params,
            &self.field,
            &mut self.rng,
            &mut self.hdr,
        );

        self.stats.particles += 1;
        self.stats.splats += result.splats;
        if let Fate::Died { iteration } = result.fate {
            self.stats.deaths += 1;
            log::trace!("Particle died after {} iterations", iteration);
        }
    }
}
