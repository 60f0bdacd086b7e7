//! RPC seams between the upload orchestrator and the cluster
//!
//! The orchestrator only sees these traits; the HTTP implementations
//! live here at the edge. Both carry a bounded request timeout so an
//! unreachable target fails instead of hanging, and both surface
//! failures as values the caller must handle.

use crate::common::{encode_file_id, PlacementRequest, Result, WriteOutcome};
use crate::coordinator::placement::PlacementDecision;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

/// Placement query against the coordinator.
pub trait PlacementService {
    fn decide_placement(
        &self,
        file_id: &str,
        file_size: u64,
    ) -> impl std::future::Future<Output = Result<PlacementDecision>> + Send;
}

/// Blob write/delete against one storage node, addressed by identity.
pub trait BlobTransport {
    fn write_blob(
        &self,
        node_id: &str,
        file_id: &str,
        data: Bytes,
    ) -> impl std::future::Future<Output = Result<WriteOutcome>> + Send;

    fn delete_blob(
        &self,
        node_id: &str,
        file_id: &str,
    ) -> impl std::future::Future<Output = Result<WriteOutcome>> + Send;
}

/// Resolves a node identity to its HTTP base URL: explicit overrides
/// first, then a `http://{id}:{port}` pattern the way the cluster
/// addresses nodes by hostname.
#[derive(Debug, Clone)]
pub struct NodeDirectory {
    overrides: HashMap<String, String>,
    default_port: u16,
}

pub const DEFAULT_NODE_PORT: u16 = 6000;

impl Default for NodeDirectory {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            default_port: DEFAULT_NODE_PORT,
        }
    }
}

impl NodeDirectory {
    pub fn new(default_port: u16) -> Self {
        Self {
            overrides: HashMap::new(),
            default_port,
        }
    }

    /// Parse `id=url` pairs (e.g. from `--node` CLI flags).
    pub fn from_pairs(pairs: &[String]) -> Result<Self> {
        let mut directory = Self::default();
        for pair in pairs {
            let (id, url) = pair.split_once('=').ok_or_else(|| {
                crate::Error::InvalidConfig(format!("expected id=url, got: {}", pair))
            })?;
            directory.insert(id, url);
        }
        Ok(directory)
    }

    pub fn insert(&mut self, node_id: &str, url: &str) {
        self.overrides
            .insert(node_id.to_string(), url.trim_end_matches('/').to_string());
    }

    pub fn resolve(&self, node_id: &str) -> String {
        match self.overrides.get(node_id) {
            Some(url) => url.clone(),
            None => format!("http://{}:{}", node_id, self.default_port),
        }
    }
}

/// Placement queries over HTTP.
pub struct HttpPlacementClient {
    coordinator_url: String,
    client: reqwest::Client,
}

impl HttpPlacementClient {
    pub fn new(coordinator_url: &str, request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("reqwest client");

        Self {
            coordinator_url: coordinator_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

impl PlacementService for HttpPlacementClient {
    async fn decide_placement(&self, file_id: &str, file_size: u64) -> Result<PlacementDecision> {
        let url = format!("{}/placement", self.coordinator_url);
        let decision = self
            .client
            .post(&url)
            .json(&PlacementRequest {
                file_id: file_id.to_string(),
                file_size,
            })
            .send()
            .await?
            .json()
            .await?;

        Ok(decision)
    }
}

/// Blob writes/deletes over HTTP.
pub struct HttpBlobTransport {
    directory: NodeDirectory,
    client: reqwest::Client,
}

impl HttpBlobTransport {
    pub fn new(directory: NodeDirectory, request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("reqwest client");

        Self { directory, client }
    }

    fn blob_url(&self, node_id: &str, file_id: &str) -> String {
        format!(
            "{}/blobs/{}",
            self.directory.resolve(node_id),
            encode_file_id(file_id)
        )
    }
}

impl BlobTransport for HttpBlobTransport {
    async fn write_blob(&self, node_id: &str, file_id: &str, data: Bytes) -> Result<WriteOutcome> {
        let outcome = self
            .client
            .put(self.blob_url(node_id, file_id))
            .body(data)
            .send()
            .await?
            .json()
            .await?;

        Ok(outcome)
    }

    async fn delete_blob(&self, node_id: &str, file_id: &str) -> Result<WriteOutcome> {
        let outcome = self
            .client
            .delete(self.blob_url(node_id, file_id))
            .send()
            .await?
            .json()
            .await?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_fallback_pattern() {
        let directory = NodeDirectory::default();
        assert_eq!(directory.resolve("datanode-1"), "http://datanode-1:6000");
    }

    #[test]
    fn test_directory_override() {
        let directory =
            NodeDirectory::from_pairs(&["node-a=http://127.0.0.1:6100/".to_string()]).unwrap();
        assert_eq!(directory.resolve("node-a"), "http://127.0.0.1:6100");
        assert_eq!(directory.resolve("node-b"), "http://node-b:6000");
    }

    #[test]
    fn test_directory_rejects_bad_pair() {
        assert!(NodeDirectory::from_pairs(&["no-equals-sign".to_string()]).is_err());
    }
}
