//! Upload client: placement query, replicated write, all-or-nothing
//! consistency with best-effort cleanup.

pub mod transport;
pub mod upload;

pub use transport::{
    BlobTransport, HttpBlobTransport, HttpPlacementClient, NodeDirectory, PlacementService,
};
pub use upload::{UploadMode, UploadOrchestrator};
