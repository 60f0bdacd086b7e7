//! Coordinator implementation
//!
//! The coordinator is responsible for:
//! - Liveness tracking (heartbeats + staleness timeout)
//! - Placement decisions (round-robin primary + sorted-successor replica)

pub mod http;
pub mod membership;
pub mod placement;
pub mod server;

pub use placement::{PlacementDecision, PlacementManager};
pub use server::Coordinator;
