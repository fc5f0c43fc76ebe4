//! End-to-end runs through files on disk.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use image::{Rgba, RgbaImage};
use tempfile::tempdir;

use nebula::params::{ParticlePolicy, PipelineConfig};
use nebula::render::render;
use nebula::tonemap::tonemap_pixel;
use nebula::NebulaError;

/// 2x2 texture decoding to (0,0) (1,0) / (-1,0) (0,1)
fn write_scenario_noise(path: &Path) {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([127, 127, 0, 255]));
    img.put_pixel(1, 0, Rgba([255, 127, 0, 255]));
    img.put_pixel(0, 1, Rgba([0, 127, 0, 255]));
    img.put_pixel(1, 1, Rgba([127, 255, 0, 255]));
    img.save(path).unwrap();
}

fn config(policy: ParticlePolicy, workers: usize) -> PipelineConfig {
    PipelineConfig {
        policy,
        workers: NonZeroUsize::new(workers).unwrap(),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_single_particle_scenario() {
    let dir = tempdir().unwrap();
    let noise = dir.path().join("noise.png");
    let commands = dir.path().join("commands.txt");
    let output = dir.path().join("out.png");

    write_scenario_noise(&noise);
    fs::write(
        &commands,
        "COLOUR 1 0 0\nSIMULATE 1 1 0.0 1.0 0.0\nPARTICLE 0 0 0 0\nTONEMAP 1.0\n",
    )
    .unwrap();

    for policy in [ParticlePolicy::Immediate, ParticlePolicy::Batched] {
        let mut status = Vec::new();
        let report = render(&commands, &noise, &output, config(policy, 2), &mut status).unwrap();
        assert!(report.saved);
        assert_eq!(report.stats.particles, 1);
        assert_eq!(report.stats.splats, 1);

        let img = image::open(&output).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [tonemap_pixel(1.0, 1.0), 0, 0, 255]);
        for (x, y) in [(1, 0), (0, 1), (1, 1)] {
            assert_eq!(img.get_pixel(x, y).0, [0, 0, 0, 255]);
        }

        let status = String::from_utf8(status).unwrap();
        let lines: Vec<&str> = status.lines().collect();
        assert!(lines[0].starts_with("# Loaded: ") && lines[0].ends_with("[2x2x4]"));
        assert!(lines[1].starts_with("# Commands: "));
        assert_eq!(lines[2], "# Simulate: 1 1 0.000000 1.000000 0.000000");
        assert_eq!(lines[3], "# Tonemap: 1.000000");
        assert!(lines[4].starts_with("# Saved: "));
    }
}

#[test]
fn test_thread_count_does_not_change_output() {
    let dir = tempdir().unwrap();
    let noise = dir.path().join("noise.png");
    let commands = dir.path().join("commands.txt");

    let img = nebula::noise::FlowNoiseGenerator::new(3, 0.05).render(40, 30);
    img.save(&noise).unwrap();

    let mut script = String::from("COLOUR 40 20 10\nSIMULATE 30 4 0.9 0.5 2.0\n");
    for i in 0..30 {
        script.push_str(&format!("PARTICLE {} {} 0.5 -0.25\n", i + 5, i % 30));
    }
    script.push_str("TONEMAP 1.5\n");
    fs::write(&commands, script).unwrap();

    let mut outputs = Vec::new();
    for workers in [1, 4, 7] {
        let output = dir.path().join(format!("out{}.png", workers));
        render(
            &commands,
            &noise,
            &output,
            config(ParticlePolicy::Immediate, workers),
            std::io::sink(),
        )
        .unwrap();
        outputs.push(fs::read(&output).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
}

#[test]
fn test_missing_commands_file() {
    let dir = tempdir().unwrap();
    let noise = dir.path().join("noise.png");
    write_scenario_noise(&noise);

    let mut status = Vec::new();
    let result = render(
        &dir.path().join("missing.txt"),
        &noise,
        &dir.path().join("out.png"),
        PipelineConfig::default(),
        &mut status,
    );

    assert!(matches!(result, Err(NebulaError::Open { .. })));
    assert!(String::from_utf8(status).unwrap().contains("# Failed to open: "));
}

#[test]
fn test_no_tonemap_writes_nothing() {
    let dir = tempdir().unwrap();
    let noise = dir.path().join("noise.png");
    let commands = dir.path().join("commands.txt");
    let output = dir.path().join("out.png");

    write_scenario_noise(&noise);
    fs::write(&commands, "SIMULATE 1 1 1 0 0\nPARTICLE 0 0 0 0\n").unwrap();

    let report = render(
        &commands,
        &noise,
        &output,
        PipelineConfig::default(),
        std::io::sink(),
    )
    .unwrap();
    assert!(!report.saved);
    assert!(!output.exists());
}

#[test]
fn test_unreadable_noise_image() {
    let dir = tempdir().unwrap();
    let noise = dir.path().join("noise.png");
    let commands = dir.path().join("commands.txt");
    fs::write(&noise, b"not an image").unwrap();
    fs::write(&commands, "TONEMAP 1\n").unwrap();

    let result = render(
        &commands,
        &noise,
        &dir.path().join("out.png"),
        PipelineConfig::default(),
        std::io::sink(),
    );
    assert!(matches!(result, Err(NebulaError::Image(_))));
}

#[test]
fn test_generated_script_renders() {
    let dir = tempdir().unwrap();
    let noise = dir.path().join("noise.png");
    let commands = dir.path().join("commands.txt");
    let output = dir.path().join("out.png");

    nebula::noise::FlowNoiseGenerator::new(1, 0.02)
        .render(64, 64)
        .save(&noise)
        .unwrap();

    let script = nebula::params::NebulaScript {
        iterations: 10,
        step_sample_rate: 2,
        spawn: 1,
        centre: [32.0, 32.0],
        rings: vec![nebula::params::Ring {
            radius: 10.0,
            colour: [1.0, 0.5, 0.25],
        }],
        ..Default::default()
    };
    let mut text = Vec::new();
    let particles = nebula::script::write_script(&script, &mut text).unwrap();
    fs::write(&commands, text).unwrap();

    let report = render(
        &commands,
        &noise,
        &output,
        PipelineConfig::default(),
        std::io::sink(),
    )
    .unwrap();
    assert!(report.saved);
    assert_eq!(report.stats.particles, particles);
    // The END marker after the ring is skipped, not fatal
    assert_eq!(report.stats.skipped_lines, 1);
}

#[test]
fn test_latin1_comment_does_not_abort() {
    let dir = tempdir().unwrap();
    let noise = dir.path().join("noise.png");
    let commands = dir.path().join("commands.txt");
    let output = dir.path().join("out.png");

    write_scenario_noise(&noise);
    let mut script = b"# caf\xe9 nebula\n".to_vec();
    script.extend_from_slice(b"COLOUR 1 0 0\nSIMULATE 1 1 0.0 1.0 0.0\nPARTICLE 0 0 0 0\nTONEMAP 1.0\n");
    fs::write(&commands, script).unwrap();

    let report = render(
        &commands,
        &noise,
        &output,
        PipelineConfig::default(),
        std::io::sink(),
    )
    .unwrap();
    assert!(report.saved);
    assert!(output.exists());

    let img = image::open(&output).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [tonemap_pixel(1.0, 1.0), 0, 0, 255]);
}
