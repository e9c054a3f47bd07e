use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{services::get_metrics, AppState};

/// Liveness probe backed by [`CustomerService::ping`](crate::services::CustomerService::ping).
pub async fn liveness(State(state): State<AppState>) -> impl IntoResponse {
    match state.customers.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "UP",
                "checks": [{ "id": "health", "status": "UP" }]
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Liveness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "DOWN",
                    "checks": [{ "id": "health", "status": "DOWN" }]
                })),
            )
        }
    }
}

pub async fn readiness() -> &'static str {
    "OK"
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
