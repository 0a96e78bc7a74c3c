use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slotnav_cli::Target;

#[derive(Parser)]
#[command(
    name = "slotnav-cli",
    about = "Inspect and render file-system-shaped route manifests",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the ordered route table of every navigator
    Routes {
        /// Path to the route manifest (TOML)
        manifest: PathBuf,
    },

    /// Render the active branch, optionally after navigating
    Render {
        /// Path to the route manifest (TOML)
        manifest: PathBuf,

        /// Navigate a navigator before rendering, as CONTEXT=NAME (repeatable)
        #[arg(long = "navigate", value_name = "CONTEXT=NAME")]
        targets: Vec<Target>,

        /// Keep slot content mounted across route switches
        #[arg(long)]
        prevent_remount: bool,

        /// Also print every navigator's state as JSON
        #[arg(long)]
        state: bool,
    },
}
