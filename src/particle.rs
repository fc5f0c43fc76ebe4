//! Particle advection through the noise field.
//!
//! Each outer iteration steers the velocity from the noise vector under the particle,
//! then walks `step_sample_rate` fractional sub-steps, splatting colour into the HDR
//! buffer at every landing cell. Leaving the field kills the particle on the spot.

use glam::Vec2;

use crate::hdr::HdrBuffer;
use crate::noise::NoiseField;
use crate::params::SimulationParams;
use crate::prng::Prng;

/// A single tracer, owned by one advection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in pixels
    pub position: Vec2,

    /// Velocity in pixels per outer iteration
    pub velocity: Vec2,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
        }
    }
}

/// How an advection run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Completed every iteration inside the field
    Survived,

    /// Left the field after `iteration` full outer iterations
    Died { iteration: u32 },
}

/// Summary of one advection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advection {
    pub fate: Fate,

    /// Number of colour splats written into the HDR buffer
    pub splats: u64,
}

/// Steer one velocity component
///
/// The noise term is carried in double precision and the sum rounded back to f32, which
/// keeps replays of existing command streams pixel-identical.
fn steer(velocity: f32, noise: f32, jitter: f32, params: &SimulationParams) -> f32 {
    ((velocity * params.damping) as f64
        + noise as f64 * SimulationParams::NOISE_SCALE * params.noisy as f64
        + (jitter * params.fuzz) as f64) as f32
}

/// Advect `particle` with `params`, accumulating into `hdr`
///
/// A particle whose starting cell is already outside the field is dead on arrival: it
/// makes no splats and draws nothing from `rng`.
pub fn advect(
    particle: &mut Particle,
    params: &SimulationParams,
    field: &NoiseField,
    rng: &mut Prng,
    hdr: &mut HdrBuffer,
) -> Advection {
    let mut splats = 0;

    if !field.contains(particle.position.x, particle.position.y) {
        return Advection {
            fate: Fate::Died { iteration: 0 },
            splats,
        };
    }

    let step = 1.0 / params.step_sample_rate as f32;

    for iteration in 0..params.iterations {
        let noise = field.sample(particle.position.x, particle.position.y);

        let jitter_x = rng.next_in_range(SimulationParams::FUZZ_EXTENT);
        let vx = steer(particle.velocity.x, noise.x, jitter_x, params);
        let jitter_y = rng.next_in_range(SimulationParams::FUZZ_EXTENT);
        let vy = steer(particle.velocity.y, noise.y, jitter_y, params);
        particle.velocity = Vec2::new(vx, vy);

        for _ in 0..params.step_sample_rate {
            particle.position += particle.velocity * step;

            let Some((cx, cy)) = field.cell(particle.position.x, particle.position.y) else {
                return Advection {
                    fate: Fate::Died { iteration },
                    splats,
                };
            };

            hdr.accumulate(cx, cy, params.colour);
            splats += 1;
        }
    }

    Advection {
        fate: Fate::Survived,
        splats,
    }
}
