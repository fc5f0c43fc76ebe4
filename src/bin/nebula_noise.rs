//! Flow noise texture generator
//!
//! Renders two OpenSimplex fields into the red and green channels of a PNG that the
//! `nebula` renderer can use as its noise input.

use std::time::Instant;

use clap::Parser;

use nebula::noise::FlowNoiseGenerator;
use nebula::params::FlowNoiseConfig;

#[derive(Parser, Debug)]
#[command(name = "nebula-noise")]
#[command(about = "Generate a flow noise texture to PNG")]
struct Args {
    /// RNG seed for noise generation
    #[arg(long, default_value_t = FlowNoiseConfig::default().seed)]
    seed: u32,

    /// Noise frequency (spatial scale)
    #[arg(long, default_value_t = FlowNoiseConfig::default().frequency)]
    frequency: f64,

    /// Output image width
    #[arg(long, default_value_t = FlowNoiseConfig::default().width)]
    width: u32,

    /// Output image height
    #[arg(long, default_value_t = FlowNoiseConfig::default().height)]
    height: u32,

    /// Output file path
    #[arg(long, default_value = "noise.png")]
    output: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = FlowNoiseConfig {
        seed: args.seed,
        frequency: args.frequency,
        width: args.width,
        height: args.height,
    };

    println!("Flow Noise Generator");
    println!("  Seed: {}", config.seed);
    println!("  Frequency: {}", config.frequency);
    println!("  Size: {}x{}", config.width, config.height);

    let start = Instant::now();

    let img = FlowNoiseGenerator::from(&config).render(config.width, config.height);
    img.save(&args.output)?;

    let elapsed = start.elapsed();
    println!("  Output: {}", args.output);
    println!("  Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}
