//! Ring command-stream generator.
//!
//! Writes concentric rings of particles, one SIMULATE/COLOUR block per ring, followed by a
//! single TONEMAP. Initial velocities come from the crate PRNG so a seed fully determines
//! the stream.

use std::f32::consts::TAU;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::params::NebulaScript;
use crate::prng::Prng;

/// Angular positions around a ring: `0..TAU` stepping `0.5 / radius` radians
fn ring_angles(radius: f32) -> impl Iterator<Item = f32> {
    let step = 0.5 / radius;
    std::iter::successors(Some(0.0f32), move |a| Some(a + step)).take_while(|a| *a < TAU)
}

/// Write the command stream for `script` into `out`; returns the particle count
pub fn write_script(script: &NebulaScript, mut out: impl Write) -> Result<u64> {
    script.validate()?;

    let mut rng = Prng::new(script.seed);
    let mut particles = 0u64;
    let [cx, cy] = script.centre;

    for ring in &script.rings {
        log::info!(
            "Generating ring radius:{} colour:{:?}",
            ring.radius,
            ring.colour
        );
        writeln!(out, "# Ring radius {}", ring.radius)?;
        writeln!(
            out,
            "SIMULATE {} {} {} {} {}",
            script.iterations, script.step_sample_rate, script.damping, script.noisy, script.fuzz
        )?;
        let [r, g, b] = ring.colour.map(|c| c * script.intensity);
        writeln!(out, "COLOUR {} {} {}", r, g, b)?;

        for angle in ring_angles(ring.radius) {
            let (x, y) = (cx + ring.radius * angle.cos(), cy + ring.radius * angle.sin());
            for _ in 0..script.spawn {
                let vx = rng.next_in_range(script.initial_vx);
                let vy = rng.next_in_range(script.initial_vy);
                writeln!(out, "PARTICLE {} {} {} {}", x, y, vx, vy)?;
                particles += 1;
            }
        }
        writeln!(out, "END")?;
    }
    writeln!(out, "TONEMAP {}", script.exposure)?;

    Ok(particles)
}

/// Write each script to `dir/NNN.nebula.txt`; returns the paths in order
pub fn write_scripts(scripts: &[NebulaScript], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(scripts.len());
    for (n, script) in scripts.iter().enumerate() {
        let path = dir.join(format!("{:03}.nebula.txt", n));
        let mut out = BufWriter::new(File::create(&path)?);
        let particles = write_script(script, &mut out)?;
        out.flush()?;

        log::debug!("{}: {} particles", path.display(), particles);
        paths.push(path);
    }
    Ok(paths)
}
