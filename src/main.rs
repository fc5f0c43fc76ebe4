//! Nebula - particle advection texture generator
//!
//! Reads a command stream, pushes particles through the flow field encoded in a noise
//! texture, and tonemaps the accumulated light into an image.

use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use nebula::cli::{usage, Args};
use nebula::error::NebulaError;
use nebula::render::render;

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // Usage errors are not failures for this tool
            log::debug!("{}", e);
            let program = std::env::args().next().unwrap_or_else(|| "nebula".to_string());
            println!("{}", usage(&program));
            return ExitCode::SUCCESS;
        }
    };

    let config = args.pipeline_config();
    log::debug!("{:?}", config);

    match render(&args.commands, &args.noise, &args.output, config, io::stdout().lock()) {
        Ok(report) => {
            log::debug!("{:?}", report);
            ExitCode::SUCCESS
        }
        Err(NebulaError::Open { .. }) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
