//! Replicated upload protocol
//!
//! One upload asks the coordinator for a placement, pushes the blob
//! to every selected target and enforces an all-or-nothing success
//! rule: the upload succeeds only if every selected target accepted
//! the write. A target that cannot be reached is recorded as a failed
//! outcome for that target only; sibling targets are always attempted.

use crate::client::transport::{BlobTransport, PlacementService};
use crate::common::WriteOutcome;
use bytes::Bytes;

/// Target-set selection for one upload.
///
/// `Replicated` writes to the full placement decision. `Sequential`
/// restricts the upload to the decision's first target, simulating
/// single-node operation on a multi-node deployment, and cleans the
/// written blob up again afterwards so storage state stays pristine
/// for comparison runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    Sequential,
    Replicated,
}

pub struct UploadOrchestrator<P, T> {
    placement: P,
    transport: T,
}

impl<P: PlacementService, T: BlobTransport> UploadOrchestrator<P, T> {
    pub fn new(placement: P, transport: T) -> Self {
        Self {
            placement,
            transport,
        }
    }

    /// Upload `data` under `file_id`. Returns true iff every selected
    /// target accepted the write. "No nodes available" and "write
    /// inconsistency" both collapse to false; the log lines tell them
    /// apart for operator triage.
    pub async fn upload(&self, file_id: &str, data: Bytes, mode: UploadMode) -> bool {
        let decision = match self
            .placement
            .decide_placement(file_id, data.len() as u64)
            .await
        {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!("placement request for {} failed: {}", file_id, e);
                return false;
            }
        };

        if decision.targets.is_empty() {
            tracing::warn!("upload of {} aborted: no active nodes", file_id);
            return false;
        }

        let selected: &[String] = match mode {
            UploadMode::Sequential => &decision.targets[..1],
            UploadMode::Replicated => &decision.targets[..],
        };

        let mut succeeded: Vec<&String> = Vec::new();
        for node_id in selected {
            let outcome = match self
                .transport
                .write_blob(node_id, file_id, data.clone())
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => WriteOutcome::failed(format!("unreachable: {}", e)),
            };

            if outcome.success {
                succeeded.push(node_id);
            } else {
                tracing::warn!(
                    "write of {} to {} failed: {}",
                    file_id,
                    node_id,
                    outcome.message
                );
            }
        }

        let success = succeeded.len() == selected.len();

        // Cleanup path: a successful Sequential upload deletes what it
        // just wrote. A failed delete is logged but never changes the
        // already-decided result. A failed upload triggers nothing.
        if success && mode == UploadMode::Sequential {
            for node_id in &succeeded {
                match self.transport.delete_blob(node_id, file_id).await {
                    Ok(outcome) if outcome.success => {
                        tracing::debug!("cleanup delete of {} on {} done", file_id, node_id)
                    }
                    Ok(outcome) => tracing::warn!(
                        "cleanup delete of {} on {} failed: {}",
                        file_id,
                        node_id,
                        outcome.message
                    ),
                    Err(e) => tracing::warn!(
                        "cleanup delete of {} on {} unreachable: {}",
                        file_id,
                        node_id,
                        e
                    ),
                }
            }
        }

        if success {
            tracing::info!(
                "upload of {} ok ({} target{})",
                file_id,
                selected.len(),
                if selected.len() == 1 { "" } else { "s" }
            );
        } else {
            tracing::warn!(
                "upload of {} incomplete: {}/{} targets accepted",
                file_id,
                succeeded.len(),
                selected.len()
            );
        }

        success
    }
}
