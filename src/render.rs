//! File-level pipeline: decode noise, interpret commands, encode output.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::Instant;

use crate::error::{NebulaError, Result};
use crate::interpreter::{Interpreter, Outcome, RunStats};
use crate::noise::NoiseField;
use crate::params::PipelineConfig;

/// Result of a completed render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    /// Whether a TONEMAP directive produced an output file
    pub saved: bool,
    pub stats: RunStats,
}

/// Run a command file against a noise image, writing `output` on TONEMAP
pub fn render(
    commands_path: &Path,
    noise_path: &Path,
    output_path: &Path,
    config: PipelineConfig,
    mut status: impl Write,
) -> Result<RenderReport> {
    let start = Instant::now();

    let image = image::open(noise_path)?;
    let channels = image.color().channel_count();
    let field = NoiseField::from_image(&image.to_rgba8())?;
    writeln!(
        status,
        "# Loaded: {} [{}x{}x{}]",
        noise_path.display(),
        field.width(),
        field.height(),
        channels
    )?;

    let commands = match File::open(commands_path) {
        Ok(file) => file,
        Err(source) => {
            writeln!(status, "# Failed to open: {}", commands_path.display())?;
            return Err(NebulaError::Open {
                path: commands_path.to_path_buf(),
                source,
            });
        }
    };
    writeln!(status, "# Commands: {}", commands_path.display())?;

    let mut interpreter = Interpreter::new(field, config, &mut status);
    let outcome = interpreter.run(BufReader::new(commands))?;
    let stats = interpreter.stats();

    let saved = match outcome {
        Outcome::Tonemapped(output) => {
            output.save(output_path)?;
            writeln!(status, "# Saved: {}", output_path.display())?;
            true
        }
        Outcome::EndOfStream => {
            log::warn!("No TONEMAP directive; nothing written");
            false
        }
    };

    log::info!("Finished in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
    Ok(RenderReport { saved, stats })
}
