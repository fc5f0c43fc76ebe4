//! Ring command-stream generator
//!
//! Writes nebula command streams of concentric particle rings. Parameters come from an
//! optional TOML file holding either one script or a `[[scripts]]` list; anything a script
//! omits keeps its default. One `NNN.nebula.txt` is written per script and the paths are
//! printed as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use nebula::params::NebulaScript;
use nebula::script::write_scripts;

#[derive(Parser, Debug)]
#[command(name = "nebula-script")]
#[command(about = "Generate ring command streams for the nebula renderer")]
struct Args {
    /// TOML parameter file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the velocity seed of every script
    #[arg(long)]
    seed: Option<u64>,

    /// Directory receiving the numbered command files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Serialize)]
struct Outputs {
    outputs: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut scripts = match &args.config {
        Some(path) => NebulaScript::list_from_toml(&fs::read_to_string(path)?)?,
        None => vec![NebulaScript::default()],
    };
    if let Some(seed) = args.seed {
        for script in &mut scripts {
            script.seed = seed;
        }
    }
    log::debug!("{:?}", scripts);

    let outputs = write_scripts(&scripts, &args.output_dir)?;
    println!("{}", serde_json::to_string(&Outputs { outputs })?);
    log::info!("{} scripts written", scripts.len());

    Ok(())
}
