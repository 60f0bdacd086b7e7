//! Coordinator server

use crate::common::{CoordinatorConfig, Result};
use crate::coordinator::http::{create_router, CoordState};
use crate::coordinator::placement::PlacementManager;
use std::sync::{Arc, Mutex};

pub struct Coordinator {
    config: CoordinatorConfig,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self { config }
    }

    pub async fn serve(self) -> Result<()> {
        tracing::info!("Starting coordinator");
        tracing::info!("  HTTP API: {}", self.config.bind_addr);
        tracing::info!(
            "  Heartbeat timeout: {}s",
            self.config.heartbeat_timeout_secs
        );

        let placement = Arc::new(Mutex::new(PlacementManager::new(
            self.config.heartbeat_timeout(),
        )));

        let state = CoordState { placement };
        let router = create_router(state);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("✓ Coordinator ready, waiting for heartbeats");

        axum::serve(listener, router).await?;

        Ok(())
    }
}
