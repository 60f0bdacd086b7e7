//! Coordinator binary

use clap::{Parser, Subcommand};
use minidfs::{common::CoordinatorConfig, Coordinator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "minidfs-coord")]
#[command(about = "minidfs coordinator: node liveness and file placement")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start coordinator server
    Serve {
        /// Bind address for HTTP
        #[arg(long)]
        bind: Option<String>,

        /// Seconds without a heartbeat before a node counts as stale
        #[arg(long)]
        heartbeat_timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            heartbeat_timeout,
        } => {
            // File/env config first, CLI overrides on top
            let mut config = minidfs::Config::load()?
                .coordinator
                .unwrap_or_else(CoordinatorConfig::default);
            if let Some(bind) = bind {
                config.bind_addr = bind.parse()?;
            }
            if let Some(timeout) = heartbeat_timeout {
                config.heartbeat_timeout_secs = timeout;
            }

            let coord = Coordinator::new(config);
            coord.serve().await?;
        }
    }

    Ok(())
}
