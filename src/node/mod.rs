//! Storage node implementation
//!
//! Handles named blob writes/deletes on local disk and self-reports
//! liveness to the coordinator on a fixed period.

pub mod heartbeat;
pub mod http;
pub mod server;
pub mod store;

pub use server::StorageNodeServer;
pub use store::BlobStore;
