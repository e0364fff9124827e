use std::path::PathBuf;

use clap::{Parser, Subcommand};
use propelauth_cli::commands::{diff_config, plan_update, render_validation, validate_config};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// PropelAuth roles CLI: plan role and permission changes from a TOML file
#[derive(Parser)]
#[command(name = "propelauth-roles")]
#[command(about = "Plan PropelAuth role and permission changes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a roles configuration file
    Validate {
        /// Path to the roles configuration
        #[arg(long, default_value = "roles.toml")]
        config: PathBuf,
    },

    /// Print the update payload for a configuration
    Plan {
        /// Path to the roles configuration
        #[arg(long, default_value = "roles.toml")]
        config: PathBuf,

        /// Path to a JSON snapshot of the current PropelAuth state
        #[arg(long)]
        remote: PathBuf,
    },

    /// Report drift between a configuration and a remote snapshot
    Diff {
        /// Path to the roles configuration
        #[arg(long, default_value = "roles.toml")]
        config: PathBuf,

        /// Path to a JSON snapshot of the current PropelAuth state
        #[arg(long)]
        remote: PathBuf,
    },

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("PROPELAUTH_ROLES_LOG"))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Validate { config } => match validate_config(config) {
            Ok(result) => {
                print!("{}", render_validation(&result));
                if !result.is_valid() {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Plan { config, remote } => match plan_update(config, remote).await {
            Ok(payload) => println!("{payload}"),
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Diff { config, remote } => match diff_config(config, remote).await {
            Ok(report) => match serde_json::to_string_pretty(&report) {
                Ok(rendered) => {
                    println!("{rendered}");
                    if report.has_drift() {
                        std::process::exit(2);
                    }
                }
                Err(e) => {
                    error!("Error: {e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Version => {
            println!("propelauth-roles version {}", env!("CARGO_PKG_VERSION"));
        }
    }
}
