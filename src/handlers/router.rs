//! Router configuration - centralized route definitions.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::state::AppState;
use super::{generate, health, specs};

/// Build the complete router.
///
/// CORS is applied by the caller (main.rs) so tests can exercise the routes
/// without the layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // =================================================================
        // HEALTH & STATUS
        // =================================================================
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/api/status", get(health::status))
        // =================================================================
        // GENERATION
        // =================================================================
        .route("/api/generate", post(generate::generate))
        // =================================================================
        // SPEC CRUD
        // =================================================================
        .route("/api/specs", get(specs::list_specs))
        .route("/api/specs/{spec_id}", get(specs::get_spec))
        .route("/api/specs/{spec_id}", put(specs::update_spec))
        .route("/api/specs/{spec_id}", delete(specs::delete_spec))
        // =================================================================
        // STATE
        // =================================================================
        .with_state(state)
}
