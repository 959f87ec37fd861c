//! Observability HTTP Routes
//!
//! Health check that verifies the store is reachable.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use super::response::HealthResponse;
use super::sinaxario_routes::SinaxarioState;

/// Health check route at `/health`
pub fn health_routes(state: Arc<SinaxarioState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// 200 when the store answers a ping, 503 otherwise
async fn health_handler(State(state): State<Arc<SinaxarioState>>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.service.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                version,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    version,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
