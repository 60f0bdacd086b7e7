//! Round-robin placement over the active node set
//!
//! Each decision picks a primary and, when at least two nodes are
//! active, the primary's successor in sorted order as replica. A
//! rotating cursor spreads primaries evenly across a stable active
//! set; the cursor is re-derived modulo the current active count on
//! every call, so membership changes between requests cannot index
//! out of range.

use crate::coordinator::membership::LivenessTable;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Placement decision for one file. `targets` is ordered: primary
/// first, replica second. Length 0 means no placement is possible,
/// length 1 is degraded single-copy mode. Never more than 2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementDecision {
    pub file_id: String,
    pub targets: Vec<String>,
}

impl PlacementDecision {
    pub fn primary(&self) -> Option<&str> {
        self.targets.first().map(|s| s.as_str())
    }

    pub fn replica(&self) -> Option<&str> {
        self.targets.get(1).map(|s| s.as_str())
    }
}

/// PlacementManager owns the liveness table and the rotation cursor.
/// `record_liveness` and `decide_placement` are its only entry points;
/// callers share it behind a mutex.
pub struct PlacementManager {
    table: LivenessTable,
    cursor: usize,
    heartbeat_timeout: Duration,
}

impl PlacementManager {
    pub fn new(heartbeat_timeout: Duration) -> Self {
        Self {
            table: LivenessTable::new(),
            cursor: 0,
            heartbeat_timeout,
        }
    }

    /// Record a heartbeat from `node_id`. Trusted as self-reported.
    pub fn record_liveness(&mut self, node_id: &str) {
        self.record_liveness_at(node_id, Instant::now());
    }

    pub fn record_liveness_at(&mut self, node_id: &str, now: Instant) {
        self.table.record_at(node_id, now);
    }

    /// Decide where `file_id` should go, advancing the cursor once if
    /// the decision is non-empty.
    pub fn decide_placement(&mut self, file_id: &str) -> PlacementDecision {
        self.decide_placement_at(file_id, Instant::now())
    }

    pub fn decide_placement_at(&mut self, file_id: &str, now: Instant) -> PlacementDecision {
        let active = self.table.active_at(now, self.heartbeat_timeout);
        let n = active.len();

        let targets = match n {
            0 => Vec::new(),
            1 => vec![active[0].clone()],
            _ => {
                let primary = active[self.cursor % n].clone();
                let replica = active[(self.cursor + 1) % n].clone();
                vec![primary, replica]
            }
        };

        if !targets.is_empty() {
            self.cursor = (self.cursor + 1) % n;
        }

        tracing::debug!(
            "placement for {}: targets={:?} (active={})",
            file_id,
            targets,
            n
        );

        PlacementDecision {
            file_id: file_id.to_string(),
            targets,
        }
    }

    /// Admin view of the liveness table.
    pub fn node_view(&self) -> Vec<(String, Duration, bool)> {
        self.table.view_at(Instant::now(), self.heartbeat_timeout)
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        self.heartbeat_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn manager_with_nodes(ids: &[&str], now: Instant) -> PlacementManager {
        let mut manager = PlacementManager::new(TIMEOUT);
        for id in ids {
            manager.record_liveness_at(id, now);
        }
        manager
    }

    #[test]
    fn test_no_active_nodes() {
        let now = Instant::now();
        let mut manager = manager_with_nodes(&[], now);

        let decision = manager.decide_placement_at("f.bin", now);
        assert!(decision.targets.is_empty());

        // Cursor untouched: once a node shows up, rotation starts at 0
        manager.record_liveness_at("node-a", now);
        manager.record_liveness_at("node-b", now);
        let next = manager.decide_placement_at("g.bin", now);
        assert_eq!(next.primary(), Some("node-a"));
    }

    #[test]
    fn test_single_node_degraded_mode() {
        let now = Instant::now();
        let mut manager = manager_with_nodes(&["node-a"], now);

        let decision = manager.decide_placement_at("f.bin", now);
        assert_eq!(decision.targets, vec!["node-a"]);
        assert_eq!(decision.replica(), None);
    }

    #[test]
    fn test_primaries_rotate_through_full_active_set() {
        let now = Instant::now();
        let mut manager = manager_with_nodes(&["node-b", "node-a", "node-c"], now);

        let primaries: Vec<String> = (0..3)
            .map(|i| {
                let d = manager.decide_placement_at(&format!("f{}.bin", i), now);
                d.primary().unwrap().to_string()
            })
            .collect();

        assert_eq!(primaries, vec!["node-a", "node-b", "node-c"]);

        // Fourth call wraps around
        let d = manager.decide_placement_at("f3.bin", now);
        assert_eq!(d.primary(), Some("node-a"));
    }

    #[test]
    fn test_replica_is_sorted_successor() {
        let now = Instant::now();
        let mut manager = manager_with_nodes(&["node-a", "node-b", "node-c"], now);

        for i in 0..6 {
            let d = manager.decide_placement_at(&format!("f{}.bin", i), now);
            let expected_replica = match d.primary().unwrap() {
                "node-a" => "node-b",
                "node-b" => "node-c",
                "node-c" => "node-a",
                other => panic!("unexpected primary {}", other),
            };
            assert_eq!(d.replica(), Some(expected_replica));
        }
    }

    #[test]
    fn test_targets_never_exceed_two() {
        let now = Instant::now();
        let mut manager =
            manager_with_nodes(&["n1", "n2", "n3", "n4", "n5"], now);

        let d = manager.decide_placement_at("f.bin", now);
        assert_eq!(d.targets.len(), 2);
    }

    #[test]
    fn test_cursor_survives_membership_shrink() {
        let now = Instant::now();
        let mut manager = manager_with_nodes(&["node-a", "node-b", "node-c"], now);

        // Advance cursor to 2
        manager.decide_placement_at("f0.bin", now);
        manager.decide_placement_at("f1.bin", now);

        // node-b and node-c age out; only node-a re-announces
        let later = now + Duration::from_secs(11);
        manager.record_liveness_at("node-a", later);

        // Cursor 2 re-derived mod 1: still a valid index
        let d = manager.decide_placement_at("f2.bin", later);
        assert_eq!(d.targets, vec!["node-a"]);
    }

    #[test]
    fn test_stale_node_not_placed() {
        let now = Instant::now();
        let mut manager = manager_with_nodes(&["node-a", "node-b"], now);

        let later = now + Duration::from_secs(11);
        manager.record_liveness_at("node-b", later);

        let d = manager.decide_placement_at("f.bin", later);
        assert_eq!(d.targets, vec!["node-b"]);
    }
}
