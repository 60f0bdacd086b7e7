//! Background liveness announcements
//!
//! A supervised task owned by the node's lifecycle: started once on
//! startup, runs for the life of the process, and never blocks on or
//! is blocked by request handling. A failed announcement is logged
//! and retried on the next tick; there is no backoff and no giving up.

use crate::common::{Ack, HeartbeatRequest, Result};
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct HeartbeatTask {
    node_id: String,
    coordinator_url: String,
    period: Duration,
    grace: Duration,
    client: reqwest::Client,
}

impl HeartbeatTask {
    pub fn new(
        node_id: String,
        coordinator_url: String,
        period: Duration,
        grace: Duration,
        request_timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("reqwest client");

        Self {
            node_id,
            coordinator_url,
            period,
            grace,
            client,
        }
    }

    /// Spawn the announce loop. The returned handle is held by the
    /// server for the process lifetime; the loop itself never exits.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(self.grace).await;

            let mut ticker = tokio::time::interval(self.period);
            loop {
                ticker.tick().await;
                match self.announce().await {
                    Ok(()) => tracing::debug!("{}: heartbeat sent", self.node_id),
                    Err(e) => {
                        tracing::warn!("{}: heartbeat to coordinator failed: {}", self.node_id, e)
                    }
                }
            }
        })
    }

    async fn announce(&self) -> Result<()> {
        let url = format!("{}/heartbeat", self.coordinator_url);
        let ack: Ack = self
            .client
            .post(&url)
            .json(&HeartbeatRequest {
                node_id: self.node_id.clone(),
            })
            .send()
            .await?
            .json()
            .await?;

        if !ack.success {
            return Err(crate::Error::Http(format!(
                "heartbeat rejected: {}",
                ack.message
            )));
        }

        Ok(())
    }
}
