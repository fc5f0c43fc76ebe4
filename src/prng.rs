//! Deterministic xorshift generator used for velocity fuzz.
//!
//! The exact bit manipulation matters: command streams are replayed against it and must
//! reproduce the same image, so this is not swapped for a general-purpose RNG.

/// Seed used when a SIMULATE directive resets the generator
pub const DEFAULT_SEED: u64 = 12118;

/// Odd 64-bit multiplier applied to the state before normalisation
const MULTIPLIER: u64 = 2685821657736338717;

/// Approximately 2^-64, maps the scrambled state into [0, 1]
const NORMALISE: f64 = 5.4210105e-20;

/// Xorshift64* style generator producing bounded floats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prng {
    seed: u64,
    state: u64,
}

impl Prng {
    /// Create a generator. A zero seed would lock the state at zero, so it becomes 1.
    pub fn new(seed: u64) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        Self { seed, state: seed }
    }

    /// Rewind to the seed this generator was created with
    pub fn reset(&mut self) {
        self.state = self.seed;
    }

    /// Draw a float in `[-extent, extent]`
    pub fn next_in_range(&mut self, extent: f32) -> f32 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;

        let unit = (self.state.wrapping_mul(MULTIPLIER) as f64 * NORMALISE) as f32;
        -extent + unit * (2.0 * extent)
    }
}

impl Default for Prng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
