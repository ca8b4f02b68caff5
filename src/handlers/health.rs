use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::instrument;

use super::api::ApiState;
use crate::services::LoadState;

/// Health check endpoint handler
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<ApiState>) -> Result<Json<Value>, StatusCode> {
    let catalog = match state.catalog_service.snapshot().state() {
        LoadState::Idle => "idle",
        LoadState::Loading => "loading",
        LoadState::Ready(_) => "ready",
        LoadState::Failed(_) => "failed",
    };

    Ok(Json(json!({
        "status": "healthy",
        "service": "marketplace-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": catalog,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
