//! Liveness tracking for storage nodes
//!
//! One record per node the coordinator has ever heard from. Records
//! are upserted on every heartbeat and never removed; staleness is a
//! read-time predicate over `last_seen`, not a stored state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Last-seen table keyed by node identity.
#[derive(Debug, Default)]
pub struct LivenessTable {
    records: HashMap<String, Instant>,
}

impl LivenessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the record for `node_id` with `now` as its last-seen
    /// time. The sole mutator of the table.
    pub fn record_at(&mut self, node_id: &str, now: Instant) {
        self.records.insert(node_id.to_string(), now);
    }

    /// Nodes whose last heartbeat is strictly younger than `timeout`,
    /// sorted ascending by identity. A record exactly at the boundary
    /// is excluded (`<`, not `<=`).
    pub fn active_at(&self, now: Instant, timeout: Duration) -> Vec<String> {
        let mut active: Vec<String> = self
            .records
            .iter()
            .filter(|(_, last_seen)| now.saturating_duration_since(**last_seen) < timeout)
            .map(|(id, _)| id.clone())
            .collect();
        active.sort();
        active
    }

    /// Full view of the table for admin endpoints: identity, age of
    /// the last heartbeat, and the staleness verdict.
    pub fn view_at(&self, now: Instant, timeout: Duration) -> Vec<(String, Duration, bool)> {
        let mut view: Vec<(String, Duration, bool)> = self
            .records
            .iter()
            .map(|(id, last_seen)| {
                let age = now.saturating_duration_since(*last_seen);
                (id.clone(), age, age < timeout)
            })
            .collect();
        view.sort_by(|a, b| a.0.cmp(&b.0));
        view
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn test_fresh_node_is_active() {
        let mut table = LivenessTable::new();
        let now = Instant::now();
        table.record_at("node-1", now);

        assert_eq!(table.active_at(now, TIMEOUT), vec!["node-1"]);
    }

    #[test]
    fn test_stale_node_is_excluded() {
        let mut table = LivenessTable::new();
        let start = Instant::now();
        table.record_at("node-1", start);

        let later = start + Duration::from_secs(11);
        assert!(table.active_at(later, TIMEOUT).is_empty());
        // The record itself is never removed
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_boundary_is_excluded() {
        let mut table = LivenessTable::new();
        let start = Instant::now();
        table.record_at("node-1", start);

        // Exactly at the timeout: age == timeout fails the strict `<`
        let boundary = start + TIMEOUT;
        assert!(table.active_at(boundary, TIMEOUT).is_empty());

        let just_inside = start + TIMEOUT - Duration::from_millis(1);
        assert_eq!(table.active_at(just_inside, TIMEOUT).len(), 1);
    }

    #[test]
    fn test_heartbeat_refreshes_record() {
        let mut table = LivenessTable::new();
        let start = Instant::now();
        table.record_at("node-1", start);

        // Re-announce after the record would otherwise have aged out
        let refresh = start + Duration::from_secs(15);
        table.record_at("node-1", refresh);

        assert_eq!(table.len(), 1);
        assert_eq!(table.active_at(refresh, TIMEOUT), vec!["node-1"]);
    }

    #[test]
    fn test_active_set_is_sorted() {
        let mut table = LivenessTable::new();
        let now = Instant::now();
        table.record_at("node-c", now);
        table.record_at("node-a", now);
        table.record_at("node-b", now);

        assert_eq!(
            table.active_at(now, TIMEOUT),
            vec!["node-a", "node-b", "node-c"]
        );
    }
}
