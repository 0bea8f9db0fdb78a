//! `dotinst` command-line entry point.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use dotinst::cli::Cli;
use dotinst::commands::install::{self, InstallOptions};
use dotinst::logging::{self, Log, Logger};
use dotinst::operations::SystemFileSystemOps;
use dotinst::platform::Platform;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);

    let log = Logger::new();
    match run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli, log: &dyn Log) -> Result<()> {
    let opts = InstallOptions::from_cli(args)?;
    install::run(&opts, &Platform::detect(), &SystemFileSystemOps, log)?;
    Ok(())
}
