//! CRUD handlers for stored specs.

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

use super::state::AppState;
use crate::errors::AppError;
use crate::model::Spec;

/// Fixed window for the recent-specs listing.
const RECENT_SPECS_LIMIT: usize = 5;

/// GET /api/specs - up to 5 most recent specs, newest first.
pub async fn list_specs(State(state): State<AppState>) -> Result<Json<Vec<Spec>>, AppError> {
    let specs = state.store.list_recent(RECENT_SPECS_LIMIT).await?;
    Ok(Json(specs))
}

/// GET /api/specs/{spec_id} - fetch a single spec.
pub async fn get_spec(
    State(state): State<AppState>,
    Path(spec_id): Path<String>,
) -> Result<Json<Spec>, AppError> {
    let spec = state
        .store
        .get(&spec_id)
        .await?
        .ok_or(AppError::SpecNotFound(spec_id))?;

    Ok(Json(spec))
}

/// PUT /api/specs/{spec_id} - replace a stored spec wholesale.
///
/// The record must already exist; the path id wins over whatever id the
/// body carries, so a spec's id never changes across updates.
#[tracing::instrument(skip(state, spec))]
pub async fn update_spec(
    State(state): State<AppState>,
    Path(spec_id): Path<String>,
    Json(mut spec): Json<Spec>,
) -> Result<Json<Spec>, AppError> {
    state
        .store
        .get(&spec_id)
        .await?
        .ok_or_else(|| AppError::SpecNotFound(spec_id.clone()))?;

    spec.id = spec_id;
    state.store.save(&spec).await?;

    info!(spec_id = %spec.id, "spec updated");

    Ok(Json(spec))
}

/// DELETE /api/specs/{spec_id} - remove a spec.
///
/// Idempotent: deleting an absent id still reports success.
pub async fn delete_spec(
    State(state): State<AppState>,
    Path(spec_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.delete(&spec_id).await?;

    info!(%spec_id, "spec deleted");

    Ok(Json(serde_json::json!({
        "message": "Spec deleted successfully"
    })))
}
