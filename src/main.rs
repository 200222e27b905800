mod cli;
mod commands;

use std::path::PathBuf;

use appbuild::BuildOptions;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let options = BuildOptions {
        root: PathBuf::from(&cli.root),
        platform: cli.platform,
        release: cli.release,
    };

    match cli.command {
        None | Some(Commands::Build) => commands::build::run(options, cli.dry_run, cli.verbose),
        Some(Commands::List) => commands::list::run(options),
        Some(Commands::Check) => commands::check::run(options),
    }
}
