//! Advection parameters set by COLOUR and SIMULATE directives.

use glam::Vec3;

/// Parameters read by every particle advected after they are set
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Colour splatted into the HDR buffer at every sub-step (linear, unbounded)
    pub colour: Vec3,

    /// Outer integration steps per particle
    pub iterations: u32,

    /// Sub-steps per outer step (each advances by 1 / step_sample_rate)
    pub step_sample_rate: u32,

    /// Velocity carried over between outer steps (1.0 = no loss)
    pub damping: f32,

    /// Gain applied to the noise vector (velocity units per outer step, before the 4x scale)
    pub noisy: f32,

    /// Gain applied to the random perturbation drawn from [-0.1, 0.1]
    pub fuzz: f32,
}

impl SimulationParams {
    /// Velocity scale applied to the raw noise vector
    pub const NOISE_SCALE: f64 = 4.0;

    /// Extent of the per-step random velocity perturbation
    pub const FUZZ_EXTENT: f32 = 0.1;
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            colour: Vec3::ONE,
            iterations: 0, // Nothing is advected until a SIMULATE directive arrives
            step_sample_rate: 1,
            damping: 1.0,
            noisy: 0.0,
            fuzz: 0.0,
        }
    }
}
