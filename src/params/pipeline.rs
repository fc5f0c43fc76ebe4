//! Pipeline-wide configuration supplied from the command line.

use std::num::NonZeroUsize;

use crate::prng::DEFAULT_SEED;

/// When PARTICLE directives are advected relative to SIMULATE directives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticlePolicy {
    /// Advect each particle as soon as it is read, with the parameters in effect at that line
    #[default]
    Immediate,

    /// Queue particles; the next SIMULATE advects the queue with its own parameters and clears it
    Batched,
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Seed the PRNG is reset to on every SIMULATE directive
    pub seed: u64,

    /// Tonemap worker threads (each owns a disjoint band of rows)
    pub workers: NonZeroUsize,

    /// Particle/parameter timing
    pub policy: ParticlePolicy,
}

impl PipelineConfig {
    /// Worker count derived from the machine, falling back to one thread
    pub fn default_workers() -> NonZeroUsize {
        std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            workers: Self::default_workers(),
            policy: ParticlePolicy::default(),
        }
    }
}
