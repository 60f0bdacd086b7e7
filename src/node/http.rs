//! HTTP API for a storage node
//!
//! Endpoints:
//! - `PUT    /blobs/:file_id` — write a named blob (overwrite allowed)
//! - `GET    /blobs/:file_id` — read a blob back
//! - `DELETE /blobs/:file_id` — remove a blob (idempotent)
//! - `GET    /stats`          — blob count and bytes held
//! - `GET    /health`         — liveness probe
//!
//! Write and delete return a `WriteOutcome` body instead of failing
//! the request: local storage errors become `success: false` with a
//! diagnostic message, never an opaque fault across the RPC boundary.

use crate::common::{NodeStats, WriteOutcome};
use crate::node::store::BlobStore;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared storage node state for HTTP handlers.
#[derive(Clone)]
pub struct NodeState {
    pub store: Arc<BlobStore>,
    pub node_id: String,
}

/// Creates the HTTP router with all storage node endpoints.
pub fn create_router(state: NodeState, max_blob_size: usize) -> Router {
    Router::new()
        .route(
            "/blobs/:file_id",
            get(read_blob).put(write_blob).delete(delete_blob),
        )
        .route("/stats", get(stats))
        .route("/health", get(health))
        // The configured blob size limit replaces axum's default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_blob_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Persist a named blob. Overwriting an existing blob of the same
/// name is allowed and indistinguishable from the first write.
async fn write_blob(
    State(state): State<NodeState>,
    Path(file_id): Path<String>,
    body: Bytes,
) -> Json<WriteOutcome> {
    tracing::info!("{}: receive file: {} ({} bytes)", state.node_id, file_id, body.len());

    match state.store.write(&file_id, &body).await {
        Ok(()) => Json(WriteOutcome::ok("stored")),
        Err(e) => {
            tracing::error!("{}: write of {} failed: {}", state.node_id, file_id, e);
            Json(WriteOutcome::failed(format!("write failed: {}", e)))
        }
    }
}

/// Read a blob back. Used by operators and tests to confirm
/// presence/absence after uploads and cleanup deletes.
async fn read_blob(
    State(state): State<NodeState>,
    Path(file_id): Path<String>,
) -> impl IntoResponse {
    match state.store.read(&file_id).await {
        Ok(Some(data)) => (StatusCode::OK, data).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("blob {} not found", file_id),
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Remove a blob. "Already gone" is reported as success.
async fn delete_blob(
    State(state): State<NodeState>,
    Path(file_id): Path<String>,
) -> Json<WriteOutcome> {
    match state.store.delete(&file_id).await {
        Ok(true) => {
            tracing::info!("{}: deleted {}", state.node_id, file_id);
            Json(WriteOutcome::ok("deleted"))
        }
        Ok(false) => Json(WriteOutcome::ok("already absent")),
        Err(e) => {
            tracing::error!("{}: delete of {} failed: {}", state.node_id, file_id, e);
            Json(WriteOutcome::failed(format!("delete failed: {}", e)))
        }
    }
}

async fn stats(State(state): State<NodeState>) -> impl IntoResponse {
    match state.store.stats().await {
        Ok((blobs, total_bytes)) => Json(NodeStats {
            node_id: state.node_id.clone(),
            blobs,
            total_bytes,
        })
        .into_response(),
        Err(e) => (e.to_http_status(), e.to_string()).into_response(),
    }
}

async fn health(State(state): State<NodeState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "node_id": state.node_id,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
