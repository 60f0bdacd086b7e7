//! Configuration for minidfs components

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration, loaded from `minidfs.toml` and `MINIDFS_*`
/// environment variables. CLI arguments override both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Coordinator-specific config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator: Option<CoordinatorConfig>,

    /// Storage-node-specific config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeConfig>,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Bind address for the HTTP API
    pub bind_addr: SocketAddr,

    /// Seconds without a heartbeat before a node is considered stale
    #[serde(default = "default_heartbeat_timeout")]
    pub heartbeat_timeout_secs: u64,
}

fn default_heartbeat_timeout() -> u64 {
    10
}

impl CoordinatorConfig {
    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".parse().unwrap(),
            heartbeat_timeout_secs: default_heartbeat_timeout(),
        }
    }
}

/// Storage node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node identity (unique across the cluster, e.g. hostname)
    pub node_id: String,

    /// Bind address for the HTTP API
    pub bind_addr: SocketAddr,

    /// Directory holding this node's blobs
    pub data_path: PathBuf,

    /// Coordinator base URL for heartbeats
    pub coordinator_url: String,

    /// Heartbeat announcement period in seconds
    #[serde(default = "default_announce_period")]
    pub announce_period_secs: u64,

    /// Initial delay before the first heartbeat, giving the
    /// coordinator time to come up
    #[serde(default = "default_announce_grace")]
    pub announce_grace_secs: u64,

    /// Bounded timeout for outbound requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted blob size in bytes
    #[serde(default = "default_max_blob_size")]
    pub max_blob_size: u64,
}

fn default_announce_period() -> u64 {
    5
}

fn default_announce_grace() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    5
}

fn default_max_blob_size() -> u64 {
    64 * 1024 * 1024
}

impl NodeConfig {
    pub fn announce_period(&self) -> Duration {
        Duration::from_secs(self.announce_period_secs)
    }

    pub fn announce_grace(&self) -> Duration {
        Duration::from_secs(self.announce_grace_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: "node-1".to_string(),
            bind_addr: "0.0.0.0:6000".parse().unwrap(),
            data_path: PathBuf::from("./node-data"),
            coordinator_url: "http://localhost:5000".to_string(),
            announce_period_secs: default_announce_period(),
            announce_grace_secs: default_announce_grace(),
            request_timeout_secs: default_request_timeout(),
            max_blob_size: default_max_blob_size(),
        }
    }
}

/// Upload client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Coordinator base URL for placement queries
    pub coordinator_url: String,

    /// Bounded timeout for outbound requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            coordinator_url: "http://localhost:5000".to_string(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from `minidfs.toml` (if present) layered
    /// with `MINIDFS_*` environment variables.
    pub fn load() -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("minidfs").required(false))
            .add_source(config::Environment::with_prefix("MINIDFS").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let coord = CoordinatorConfig::default();
        assert_eq!(coord.heartbeat_timeout(), Duration::from_secs(10));

        let node = NodeConfig::default();
        assert_eq!(node.announce_period(), Duration::from_secs(5));
        assert_eq!(node.announce_grace(), Duration::from_secs(5));
        assert_eq!(node.request_timeout(), Duration::from_secs(5));
    }
}
