//! Wire shapes shared by the coordinator, storage nodes and clients
//!
//! Every RPC boundary returns an explicit outcome value; failures are
//! data, not faults, so callers always handle them.

use serde::{Deserialize, Serialize};

/// Liveness announcement from a storage node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    pub node_id: String,
}

/// Acknowledgement for a heartbeat. Always `success: true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Placement query for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub file_id: String,
    pub file_size: u64,
}

/// Per-target result of a blob write or delete attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOutcome {
    pub success: bool,
    pub message: String,
}

impl WriteOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// One entry of the coordinator's node view (GET /nodes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub node_id: String,
    /// Seconds since the last heartbeat was received
    pub last_seen_secs: u64,
    /// Whether the node is inside the heartbeat timeout window
    pub active: bool,
}

/// Storage node statistics (GET /stats).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStats {
    pub node_id: String,
    pub blobs: u64,
    pub total_bytes: u64,
}
