//! # minidfs
//!
//! A minimal distributed file store:
//! - Heartbeat-driven membership with a staleness timeout
//! - Round-robin placement of files onto a primary and a replica
//! - Client-side replicated uploads with all-or-nothing consistency
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Coordinator                │
//! │  (liveness table + placement cursor)    │
//! └───────────▲───────────────▲─────────────┘
//!   heartbeat │               │ placement query
//!   ┌─────────┴────┬──────────┴───┐
//!   │              │              │
//! ┌─▼──────────┐ ┌─▼──────────┐ ┌─┴──────────────────┐
//! │ Node 1     │ │ Node 2     │ │ UploadOrchestrator │
//! │ (blobs)    │ │ (blobs)    │◄┤ (writes/rollback)  │
//! └────────────┘ └────────────┘ └────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Start the coordinator
//! ```bash
//! minidfs-coord serve --bind 0.0.0.0:5000
//! ```
//!
//! ### Start a storage node
//! ```bash
//! minidfs-node \
//!   --id datanode-1 \
//!   --bind 0.0.0.0:6000 \
//!   --data ./node-data \
//!   --coordinator http://localhost:5000
//! ```
//!
//! ### Use the CLI
//! ```bash
//! # Upload a file (replicated)
//! minidfs put my-file.bin --file ./data.bin --coordinator http://localhost:5000
//!
//! # List the coordinator's node view
//! minidfs nodes
//! ```

pub mod client;
pub mod common;
pub mod coordinator;
pub mod node;

// Re-export commonly used types
pub use client::{UploadMode, UploadOrchestrator};
pub use common::{Config, Error, Result};
pub use coordinator::Coordinator;
pub use node::StorageNodeServer;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
