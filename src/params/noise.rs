//! Procedural flow-noise texture configuration.

/// Flow noise texture generation parameters
#[derive(Debug, Clone)]
pub struct FlowNoiseConfig {
    /// OpenSimplex seed (the v channel uses seed + 1)
    pub seed: u32,

    /// Spatial frequency (cycles per pixel)
    pub frequency: f64,

    /// Texture width (pixels)
    pub width: u32,

    /// Texture height (pixels)
    pub height: u32,
}

impl Default for FlowNoiseConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frequency: 0.005,
            width: 1000, // Ring scripts are centred on (500, 500)
            height: 1000,
        }
    }
}
