//! Health HTTP Routes
//!
//! `GET /health` pings the store so a load balancer can tell a live process
//! from one whose database went away.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::store::StudentStore;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `"ok"` or the ping failure
    pub store: String,
}

struct HealthState {
    store: Arc<dyn StudentStore>,
    ping_timeout: Duration,
}

/// Create health routes
pub fn health_routes(store: Arc<dyn StudentStore>, ping_timeout: Duration) -> Router {
    let state = Arc::new(HealthState {
        store,
        ping_timeout,
    });
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// 200 when the store answers a ping in time, 503 otherwise
async fn health_handler(
    State(state): State<Arc<HealthState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let ping = tokio::time::timeout(state.ping_timeout, state.store.ping()).await;

    let (status, store) = match ping {
        Ok(Ok(())) => (StatusCode::OK, "ok".to_string()),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("ping timed out after {:?}", state.ping_timeout),
        ),
    };
    if status != StatusCode::OK {
        warn!(store = %store, "health check failed");
    }

    let response = HealthResponse {
        status: if status == StatusCode::OK { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
    };

    (status, Json(response))
}
