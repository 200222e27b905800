use clap::{Parser, Subcommand};

use appbuild::manifest::{Platform, ReleaseStatus};

#[derive(Parser)]
#[command(
    name = "appbuild",
    about = "Render application subtemplates into finished HTML pages",
    version
)]
pub struct Cli {
    /// Target platform (default: web)
    #[arg(long, value_enum, global = true)]
    pub platform: Option<Platform>,

    /// Minimum release maturity to build (default: deprecated)
    #[arg(long, value_enum, global = true)]
    pub release: Option<ReleaseStatus>,

    /// Project root containing the application directories
    #[arg(short = 'C', long, default_value = ".", global = true)]
    pub root: String,

    /// Render everything but write nothing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// With --dry-run, print each rendered page
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every selected target (the default)
    Build,

    /// List discovered targets and whether they would be built
    List,

    /// Validate manifests and subtemplates
    Check,
}
