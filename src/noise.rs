//! Flow vectors derived from a noise texture.
//!
//! The first two channels of each RGBA pixel encode a (u, v) direction. `NoiseField`
//! decodes them for advection; `FlowNoiseGenerator` produces such textures procedurally
//! using OpenSimplex noise.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use ::noise::{NoiseFn, OpenSimplex};

use crate::error::{NebulaError, Result};
use crate::hdr::row_major;
use crate::params::FlowNoiseConfig;

/// Bytes per decoded pixel
pub const CHANNELS: usize = 4;

/// Byte value that decodes to a zero component
const ZERO_BYTE: f32 = 127.0;

/// Immutable grid of flow vectors, one per pixel
#[derive(Debug, Clone)]
pub struct NoiseField {
    width: u32,
    height: u32,
    vectors: Vec<Vec2>,
}

impl NoiseField {
    /// Build from raw RGBA bytes (row-major, 4 bytes per pixel)
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let pixels = width as usize * height as usize;
        if width == 0 || height == 0 || bytes.len() != pixels * CHANNELS {
            return Err(NebulaError::InvalidNoise {
                width,
                height,
                len: bytes.len(),
            });
        }

        let vectors = bytes
            .chunks_exact(CHANNELS)
            .map(|px| Vec2::new(decode(px[0]), decode(px[1])))
            .collect();

        Ok(Self {
            width,
            height,
            vectors,
        })
    }

    /// Build from a decoded image
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        Self::from_rgba_bytes(image.width(), image.height(), image.as_raw())
    }

    /// Decode an image file (any format the codec supports), forcing 4 channels
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        Self::from_image(&image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the truncated cell of (x, y) lies inside the field
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.cell(x, y).is_some()
    }

    /// Truncated integer cell of a position, or `None` outside the field
    ///
    /// Truncation is toward zero, so positions in (-1, 0) still land in column/row 0.
    pub fn cell(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        if x.is_nan() || y.is_nan() {
            return None;
        }
        let (cx, cy) = (x as i64, y as i64);
        if cx < 0 || cy < 0 || cx >= self.width as i64 || cy >= self.height as i64 {
            return None;
        }
        Some((cx as u32, cy as u32))
    }

    /// Flow vector at the enclosing pixel, zero outside the field
    pub fn sample(&self, x: f32, y: f32) -> Vec2 {
        match self.cell(x, y) {
            Some((cx, cy)) => self.vectors[row_major(cx, cy, self.width)],
            None => Vec2::ZERO,
        }
    }
}

fn decode(byte: u8) -> f32 {
    (byte as f32 - ZERO_BYTE) / ZERO_BYTE
}

fn encode(value: f64) -> u8 {
    ((value + 1.0) * 127.5).clamp(0.0, 255.0) as u8
}

/// Procedural flow texture generator
pub struct FlowNoiseGenerator {
    u: OpenSimplex,
    v: OpenSimplex,
    frequency: f64,
}

impl FlowNoiseGenerator {
    /// Create generator; the two channels use decorrelated seeds
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            u: OpenSimplex::new(seed),
            v: OpenSimplex::new(seed.wrapping_add(1)),
            frequency,
        }
    }

    /// Sample the flow vector at a pixel position
    ///
    /// Returns components in range [-1, 1]
    pub fn sample(&self, x: f64, y: f64) -> (f64, f64) {
        let point = [x * self.frequency, y * self.frequency];
        (self.u.get(point), self.v.get(point))
    }

    /// Render an RGBA texture: R = u, G = v, B = neutral, A = opaque
    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let (u, v) = self.sample(x as f64, y as f64);
            *pixel = Rgba([encode(u), encode(v), ZERO_BYTE as u8, 255]);
        }
        img
    }
}

impl From<&FlowNoiseConfig> for FlowNoiseGenerator {
    fn from(config: &FlowNoiseConfig) -> Self {
        Self::new(config.seed, config.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> NoiseField {
        #[rustfmt::skip]
        let bytes = [
            127, 127, 0, 255,   255, 127, 0, 255,
            0, 127, 0, 255,     127, 255, 0, 255,
        ];
        NoiseField::from_rgba_bytes(2, 2, &bytes).unwrap()
    }

    #[test]
    fn test_decode_channels() {
        let field = two_by_two();
        assert_eq!(field.sample(0.0, 0.0), Vec2::ZERO);
        assert_eq!(field.sample(1.5, 0.2), Vec2::new(128.0 / 127.0, 0.0));
        assert_eq!(field.sample(0.9, 1.9), Vec2::new(-1.0, 0.0));
        assert_eq!(field.sample(1.0, 1.0), Vec2::new(0.0, 128.0 / 127.0));
    }

    #[test]
    fn test_out_of_bounds_returns_zero() {
        let field = two_by_two();
        for (x, y) in [(2.0, 0.0), (0.0, 2.0), (-1.0, 0.0), (0.0, -1.5), (1e9, 1e9)] {
            assert_eq!(field.sample(x, y), Vec2::ZERO, "({x}, {y})");
        }
        assert_eq!(field.sample(f32::NAN, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let field = two_by_two();
        assert_eq!(field.cell(-0.5, -0.5), Some((0, 0)));
        assert_eq!(field.cell(1.999, 0.0), Some((1, 0)));
        assert_eq!(field.cell(2.0, 0.0), None);
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        let result = NoiseField::from_rgba_bytes(2, 2, &[0u8; 15]);
        assert!(matches!(result, Err(NebulaError::InvalidNoise { .. })));

        let result = NoiseField::from_rgba_bytes(0, 4, &[]);
        assert!(matches!(result, Err(NebulaError::InvalidNoise { .. })));
    }

    #[test]
    fn test_generator_is_deterministic_and_bounded() {
        let a = FlowNoiseGenerator::new(7, 0.05).render(16, 8);
        let b = FlowNoiseGenerator::new(7, 0.05).render(16, 8);
        assert_eq!(a, b);
        assert_eq!(a.dimensions(), (16, 8));
        assert!(a.pixels().all(|p| p[3] == 255));

        let field = NoiseField::from_image(&a).unwrap();
        for y in 0..8 {
            for x in 0..16 {
                let v = field.sample(x as f32, y as f32);
                assert!(v.x.abs() <= 128.0 / 127.0 && v.y.abs() <= 128.0 / 127.0);
            }
        }
    }
}
