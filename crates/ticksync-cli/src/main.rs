mod config;
mod deploy_cmd;
mod render_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use config::DeployConfig;

#[derive(Parser)]
#[command(
    name = "ticksync",
    about = "Reconcile TICK alert definitions with a Kapacitor engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, update, and delete remote tasks so they match the alert files
    Deploy {
        /// Directory to scan for alert files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Compute and report operations without mutating the engine
        #[arg(long)]
        dry_run: bool,
    },
    /// Print one alert file's rewritten body to stdout
    Render {
        /// Path to the alert file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy { dir, dry_run } => {
            // Config errors abort here, before any remote call is made.
            let config = DeployConfig::from_env()?;
            deploy_cmd::run_deploy(&config, &dir, dry_run).await?;
        }
        Commands::Render { file } => {
            let params = config::params_from_env()?;
            print!("{}", render_cmd::run_render(&params, &file)?);
        }
    }

    Ok(())
}
