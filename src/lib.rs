//! Nebula library - particle advection through noise fields with HDR tonemapping

pub mod cli;
pub mod command;
pub mod error;
pub mod hdr;
pub mod interpreter;
pub mod noise;
pub mod params;
pub mod particle;
pub mod prng;
pub mod render;
pub mod script;
pub mod tonemap;

pub use error::{NebulaError, Result};
