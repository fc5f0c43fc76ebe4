//! HDR → 8-bit tonemapping.
//!
//! Each channel goes through an exponential exposure curve. The output grid is split
//! into contiguous row bands, one per worker thread; every worker owns its band
//! exclusively and only reads the HDR buffer, so no synchronisation is needed beyond
//! the scope join.

use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

use glam::Vec3;
use image::RgbaImage;

use crate::error::Result;
use crate::hdr::{Grid, HdrBuffer};

/// Scale applied to HDR values before the exposure curve
const CURVE_SCALE: f32 = 0.005;

/// Largest channel value the curve can produce
const CHANNEL_MAX: u8 = 254;

/// 8-bit RGBA output grid
pub type Rgba8Buffer = Grid<[u8; 4]>;

/// Map a non-negative HDR value to an 8-bit channel
///
/// `(1 - 2^(-value * 0.005 * exposure)) * 255`, truncated. The curve only approaches 255,
/// so the result is capped at 254 where f32 rounding would otherwise reach it.
#[inline]
pub fn tonemap_pixel(value: f32, exposure: f32) -> u8 {
    let curve = (1.0 - (-value * CURVE_SCALE * exposure).exp2()) * 255.0;
    // NaN and negatives saturate to 0 in the cast
    (curve as u8).min(CHANNEL_MAX)
}

fn tonemap_colour(colour: Vec3, exposure: f32) -> [u8; 4] {
    [
        tonemap_pixel(colour.x, exposure),
        tonemap_pixel(colour.y, exposure),
        tonemap_pixel(colour.z, exposure),
        255,
    ]
}

/// Tonemap the whole buffer using `workers` threads
pub fn tonemap(hdr: &HdrBuffer, exposure: f32, workers: NonZeroUsize) -> Rgba8Buffer {
    let (width, height) = (hdr.width(), hdr.height());
    let mut output = Rgba8Buffer::new(width, height, [0, 0, 0, 255]);
    if width == 0 || height == 0 {
        return output;
    }

    let rows_per_band = (height as usize).div_ceil(workers.get());
    let band_len = rows_per_band * width as usize;
    log::debug!(
        "Tonemapping {}x{} over {} bands of {} rows",
        width,
        height,
        (height as usize).div_ceil(rows_per_band),
        rows_per_band
    );

    thread::scope(|scope| {
        let bands = output
            .as_mut_slice()
            .chunks_mut(band_len)
            .zip(hdr.as_slice().chunks(band_len));

        for (out_band, hdr_band) in bands {
            scope.spawn(move || {
                for (out, colour) in out_band.iter_mut().zip(hdr_band) {
                    *out = tonemap_colour(*colour, exposure);
                }
            });
        }
    });

    output
}

impl Rgba8Buffer {
    /// Convert into an `image` buffer for encoding
    pub fn to_image(&self) -> RgbaImage {
        let bytes: &[u8] = bytemuck::cast_slice(self.as_slice());
        RgbaImage::from_raw(self.width(), self.height(), bytes.to_vec())
            .expect("grid length always matches its dimensions")
    }

    /// Encode as an image file; the format follows the path extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}
