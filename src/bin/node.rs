//! Storage node binary

use anyhow::Result;
use clap::Parser;
use minidfs::common::NodeConfig;
use minidfs::StorageNodeServer;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "minidfs-node")]
#[command(about = "minidfs storage node: holds blobs and reports liveness")]
struct Args {
    /// Node identity (unique across the cluster, e.g. hostname)
    #[arg(short, long)]
    id: Option<String>,

    /// HTTP address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Coordinator base URL
    #[arg(short, long)]
    coordinator: Option<String>,

    /// Data directory for blobs
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Heartbeat period in seconds
    #[arg(long)]
    announce_period: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // File/env config first, CLI overrides on top. The node identity
    // falls back to the machine hostname when neither provides one.
    let mut config = minidfs::Config::load()?.node.unwrap_or_default();
    if let Some(id) = args.id {
        config.node_id = id;
    } else if config.node_id == NodeConfig::default().node_id {
        if let Ok(hostname) = std::env::var("HOSTNAME") {
            config.node_id = hostname;
        }
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind.parse()?;
    }
    if let Some(coordinator) = args.coordinator {
        config.coordinator_url = coordinator;
    }
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(period) = args.announce_period {
        config.announce_period_secs = period;
    }

    let server = StorageNodeServer::new(config);
    server.serve().await?;

    Ok(())
}
