//! slotnav CLI: the `slotnav-cli` command.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use slotnav_cli::print::{output_tree, route_table};
use slotnav_cli::{CliError, Manifest, Session};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<String, CliError> {
    match command {
        Commands::Routes { manifest } => {
            let manifest = Manifest::load(&manifest)?;
            Ok(route_table(&manifest))
        }

        Commands::Render {
            manifest,
            targets,
            prevent_remount,
            state,
        } => {
            let manifest = Manifest::load(&manifest)?;
            let mut flags = manifest.flags;
            flags.prevent_layout_remounting |= prevent_remount;

            let session = Session::new(&manifest, flags);
            let mut out = output_tree(&session.run(&targets)?);
            if state {
                out.push_str(&serde_json::to_string_pretty(&session.states())?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}
