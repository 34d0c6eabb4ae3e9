//! Health and status handlers.

use axum::{extract::State, response::Json};
use serde::Serialize;

use super::state::AppState;

/// Status report for the service and its collaborators.
#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub backend: String,
    pub database: String,
    pub llm: String,
}

/// GET / - service banner.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Tasks Generator API",
        "status": "running"
    }))
}

/// GET /health - liveness check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// GET /api/status - backend, database, and completion API health.
///
/// `llm` is `"error"` exactly when no API credential is configured;
/// `database` distinguishes the durable backend from the volatile map.
pub async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    let llm_status = if state.llm.is_configured() {
        "healthy"
    } else {
        "error"
    };

    Json(SystemStatus {
        backend: "healthy".to_string(),
        database: state.store.kind().status_label().to_string(),
        llm: llm_status.to_string(),
    })
}
