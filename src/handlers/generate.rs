//! Task generation handler.

use axum::{extract::State, response::Json};
use tracing::info;

use super::state::AppState;
use crate::errors::AppError;
use crate::generate::{build_prompt, flatten_tasks, parse_breakdown};
use crate::model::{FeatureRequest, Spec};

/// POST /api/generate - run the full pipeline for one feature request.
///
/// Prompt -> completion -> parse -> flatten -> save. The store is only
/// touched after parse and flatten succeed, so a failed generate never
/// leaves a partial spec behind.
#[tracing::instrument(skip(state, request), fields(template = %request.template))]
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<FeatureRequest>,
) -> Result<Json<Spec>, AppError> {
    if request.goal.trim().is_empty() {
        return Err(AppError::InvalidInput {
            field: "goal".to_string(),
            reason: "goal cannot be empty".to_string(),
        });
    }

    let prompt = build_prompt(&request);
    let raw = state.llm.complete(&prompt).await?;

    let breakdown = parse_breakdown(&raw)?;
    let tasks = flatten_tasks(&breakdown)?;

    let spec = Spec {
        id: uuid::Uuid::new_v4().to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
        form_data: request,
        tasks,
    };

    state.store.save(&spec).await?;

    info!(spec_id = %spec.id, task_count = spec.tasks.len(), "generated spec");

    Ok(Json(spec))
}
