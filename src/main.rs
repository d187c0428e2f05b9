//! `copy-mapping` command-line entry point.
use anyhow::Result;
use clap::Parser;

use copy_mapping::cli::{Cli, Command};
use copy_mapping::commands;
use copy_mapping::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    init_subscriber(args.verbose);
    let log = Logger::new();

    match args.command {
        Command::Sync => commands::sync::run(&args.global, &log),
        Command::Remove(opts) => commands::remove::run(&args.global, &opts, &log),
        Command::Version => {
            commands::version::run(&log);
            Ok(())
        }
    }
}
