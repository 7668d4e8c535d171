use clap::Parser;
use log::{error, info, LevelFilter};

use std::error::Error;
use std::process;

mod args;
mod roster;

use crate::roster::config_reader::{read_config_file, validate_config, ConfigOverrides};

fn run(args: &args::Args) -> roster::RosterResult<()> {
    let config_file = read_config_file(&args.config)?;
    let overrides = ConfigOverrides {
        source: args.source.clone(),
        source_format: args.source_format.clone(),
        working_dir: args.working_dir.clone(),
        skip_upload: args.no_upload,
    };
    let config = validate_config(&config_file, &overrides)?;
    let report = roster::run_publish(&config)?;
    info!(
        "Done: {} reports written, {} uploaded",
        report.staged.len(),
        report.uploaded.len()
    );
    Ok(())
}

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    if let Err(e) = run(&args) {
        error!("{:?}: {}", e.kind(), e);
        eprintln!("An error occured: {}", e);
        let mut cause = e.source();
        while let Some(c) = cause {
            eprintln!("  caused by: {}", c);
            cause = c.source();
        }
        process::exit(1);
    }
}
