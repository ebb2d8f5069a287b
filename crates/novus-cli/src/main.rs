mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use novus_core::OverlaySettings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "novus")]
#[command(about = "Novus relic light tracker host simulator")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a scripted event stream and print detected light bonuses
    Replay {
        /// Script file (newline-delimited JSON events)
        script: PathBuf,

        /// Catalog file with relics and duty baselines
        #[arg(short, long, env = "NOVUS_CATALOG")]
        catalog: Option<PathBuf>,

        /// TOML configuration file, re-read on every event
        #[arg(long, env = "NOVUS_CONFIG")]
        config: Option<PathBuf>,

        /// Value the relic light progress counts towards
        #[arg(long)]
        progress_cap: Option<u32>,

        /// Name of the addon showing the relic glass
        #[arg(long)]
        addon_name: Option<String>,
    },
    /// Print the lookup tables
    Catalog {
        /// Catalog file with relics and duty baselines
        #[arg(short, long, env = "NOVUS_CATALOG")]
        catalog: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose {
        "novus=debug"
    } else {
        "novus=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    match args.command {
        Command::Replay {
            script,
            catalog,
            config,
            progress_cap,
            addon_name,
        } => {
            let mut settings = OverlaySettings::builder();
            if let Some(cap) = progress_cap {
                settings = settings.progress_cap(cap);
            }
            if let Some(name) = addon_name {
                settings = settings.addon_name(name);
            }
            commands::replay::run(
                &script,
                catalog.as_deref(),
                config.as_deref(),
                settings.build(),
            )
        }
        Command::Catalog { catalog } => commands::catalog::run(catalog.as_deref()),
    }
}
