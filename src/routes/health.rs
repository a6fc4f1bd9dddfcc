use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness probe; does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness probe; verifies database connectivity.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
