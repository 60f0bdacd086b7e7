//! CLI for uploads and cluster inspection

use clap::{Parser, Subcommand};
use minidfs::client::{HttpBlobTransport, HttpPlacementClient, NodeDirectory};
use minidfs::common::{validate_file_id, NodeView};
use minidfs::{UploadMode, UploadOrchestrator};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "minidfs")]
#[command(about = "minidfs distributed file store CLI")]
#[command(version)]
struct Cli {
    /// Coordinator URL
    #[arg(long, default_value = "http://localhost:5000")]
    coordinator: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "5")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file through the replication protocol
    Put {
        /// File id under which the blob is stored
        file_id: String,

        /// Local file to upload
        #[arg(long)]
        file: std::path::PathBuf,

        /// Restrict the upload to the primary only and clean up after
        /// (single-node simulation)
        #[arg(long)]
        sequential: bool,

        /// Node address overrides, id=url (repeatable); unlisted ids
        /// resolve to http://{id}:6000
        #[arg(long = "node")]
        nodes: Vec<String>,
    },

    /// List the coordinator's node view
    Nodes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Put {
            file_id,
            file,
            sequential,
            nodes,
        } => {
            validate_file_id(&file_id)?;
            let data = tokio::fs::read(&file).await?;

            let placement = HttpPlacementClient::new(&cli.coordinator, timeout);
            let directory = NodeDirectory::from_pairs(&nodes)?;
            let transport = HttpBlobTransport::new(directory, timeout);
            let orchestrator = UploadOrchestrator::new(placement, transport);

            let mode = if sequential {
                UploadMode::Sequential
            } else {
                UploadMode::Replicated
            };

            let ok = orchestrator.upload(&file_id, data.into(), mode).await;
            if ok {
                println!("upload of {} succeeded", file_id);
            } else {
                println!("upload of {} failed", file_id);
                std::process::exit(1);
            }
        }

        Commands::Nodes => {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            let url = format!("{}/nodes", cli.coordinator.trim_end_matches('/'));
            let nodes: Vec<NodeView> = client.get(&url).send().await?.json().await?;

            if nodes.is_empty() {
                println!("no nodes have reported yet");
            }
            for node in nodes {
                println!(
                    "{}  last seen {}s ago  {}",
                    node.node_id,
                    node.last_seen_secs,
                    if node.active { "active" } else { "stale" }
                );
            }
        }
    }

    Ok(())
}
