//! Command-line argument parsing.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::params::{ParticlePolicy, PipelineConfig};
use crate::prng::DEFAULT_SEED;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "nebula")]
#[command(about = "Advect particles through a noise field and tonemap the result", long_about = None)]
pub struct Args {
    /// Command stream (PARTICLE / COLOUR / SIMULATE / TONEMAP)
    pub commands: PathBuf,

    /// Noise texture; red and green channels give the flow vector
    pub noise: PathBuf,

    /// Output image written on TONEMAP
    pub output: PathBuf,

    /// Tonemap worker threads (defaults to available parallelism)
    #[arg(long, value_name = "N")]
    pub threads: Option<NonZeroUsize>,

    /// Queue particles and advect them at the next SIMULATE
    #[arg(long)]
    pub batch: bool,

    /// Seed the PRNG is reset to on each SIMULATE
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl Args {
    /// Build the pipeline configuration from command-line flags
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            seed: self.seed,
            workers: self.threads.unwrap_or_else(PipelineConfig::default_workers),
            policy: if self.batch {
                ParticlePolicy::Batched
            } else {
                ParticlePolicy::Immediate
            },
        }
    }
}

/// One-line usage, printed to stdout on argument errors
pub fn usage(program: &str) -> String {
    format!("# Usage: {} commands.txt noise.png output.png", program)
}
