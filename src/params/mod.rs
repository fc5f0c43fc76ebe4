//! Parameter definitions with documented units and semantics.
//!
//! All tunables are gathered here with:
//! - Documented ranges and meanings
//! - Defaults matching the historical command-stream tool
//! - Type safety where possible

mod noise;
mod pipeline;
mod script;
mod simulation;

// Re-export all types
pub use noise::FlowNoiseConfig;
pub use pipeline::{ParticlePolicy, PipelineConfig};
pub use script::{NebulaScript, Ring};
pub use simulation::SimulationParams;
