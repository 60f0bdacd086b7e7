//! Storage node server

use crate::common::{format_bytes, NodeConfig, Result};
use crate::node::heartbeat::HeartbeatTask;
use crate::node::http::{create_router, NodeState};
use crate::node::store::BlobStore;
use std::sync::Arc;

pub struct StorageNodeServer {
    config: NodeConfig,
}

impl StorageNodeServer {
    pub fn new(config: NodeConfig) -> Self {
        Self { config }
    }

    pub async fn serve(self) -> Result<()> {
        tracing::info!("Starting storage node: {}", self.config.node_id);
        tracing::info!("  HTTP API: {}", self.config.bind_addr);
        tracing::info!("  Data path: {}", self.config.data_path.display());
        tracing::info!("  Coordinator: {}", self.config.coordinator_url);
        tracing::info!(
            "  Announce period: {}s (grace {}s)",
            self.config.announce_period_secs,
            self.config.announce_grace_secs
        );

        let store = Arc::new(BlobStore::open(&self.config.data_path).await?);
        let (blobs, total_bytes) = store.stats().await?;
        tracing::info!("  Holding {} blobs ({})", blobs, format_bytes(total_bytes));

        // Heartbeat loop runs for the process lifetime, decoupled from
        // request handling
        let heartbeat = HeartbeatTask::new(
            self.config.node_id.clone(),
            self.config.coordinator_url.clone(),
            self.config.announce_period(),
            self.config.announce_grace(),
            self.config.request_timeout(),
        );
        let _heartbeat_handle = heartbeat.start();

        let state = NodeState {
            store,
            node_id: self.config.node_id.clone(),
        };
        let router = create_router(state, self.config.max_blob_size as usize);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("✓ Storage node ready, heartbeat active");

        axum::serve(listener, router).await?;

        Ok(())
    }
}
