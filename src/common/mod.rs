//! Common utilities and types shared across minidfs

pub mod api;
pub mod config;
pub mod error;
pub mod utils;

pub use api::{Ack, HeartbeatRequest, NodeStats, NodeView, PlacementRequest, WriteOutcome};
pub use config::{ClientConfig, Config, CoordinatorConfig, NodeConfig};
pub use error::{Error, Result};
pub use utils::{decode_file_id, encode_file_id, format_bytes, validate_file_id};
