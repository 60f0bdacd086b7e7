//! HTTP API for the coordinator
//!
//! Endpoints:
//! - `POST /heartbeat` — liveness announcement, always acknowledged
//! - `POST /placement` — placement decision for one file
//! - `GET  /nodes`     — liveness table view for operators
//! - `GET  /health`    — liveness probe

use crate::common::{Ack, HeartbeatRequest, NodeView, PlacementRequest};
use crate::coordinator::placement::{PlacementDecision, PlacementManager};
use axum::{extract::State, response::IntoResponse, routing::get, routing::post, Json, Router};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

/// Shared coordinator state for HTTP handlers.
#[derive(Clone)]
pub struct CoordState {
    pub placement: Arc<Mutex<PlacementManager>>,
}

/// Creates the HTTP router with all coordinator endpoints.
pub fn create_router(state: CoordState) -> Router {
    Router::new()
        .route("/heartbeat", post(heartbeat))
        .route("/placement", post(placement))
        .route("/nodes", get(nodes))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Record a liveness announcement. Idempotent upsert; never fails.
async fn heartbeat(
    State(state): State<CoordState>,
    Json(req): Json<HeartbeatRequest>,
) -> Json<Ack> {
    state
        .placement
        .lock()
        .unwrap()
        .record_liveness(&req.node_id);

    tracing::debug!("heartbeat from {}", req.node_id);
    Json(Ack::ok("ack"))
}

/// Decide placement for a file. The response's `targets` list holds
/// 0, 1 or 2 node identities (primary first).
async fn placement(
    State(state): State<CoordState>,
    Json(req): Json<PlacementRequest>,
) -> Json<PlacementDecision> {
    let decision = state
        .placement
        .lock()
        .unwrap()
        .decide_placement(&req.file_id);

    match decision.primary() {
        Some(primary) => tracing::info!(
            "assign {} ({} bytes) -> primary: {}, replica: {:?}",
            req.file_id,
            req.file_size,
            primary,
            decision.replica()
        ),
        None => tracing::warn!("no active nodes for {}", req.file_id),
    }

    Json(decision)
}

/// Liveness table view: every node ever seen, with heartbeat age and
/// the current staleness verdict.
async fn nodes(State(state): State<CoordState>) -> Json<Vec<NodeView>> {
    let view = state.placement.lock().unwrap().node_view();

    Json(
        view.into_iter()
            .map(|(node_id, age, active)| NodeView {
                node_id,
                last_seen_secs: age.as_secs(),
                active,
            })
            .collect(),
    )
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
