//! Shared application context.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::CompletionClient;
use crate::storage::SpecStore;

/// Everything the handlers need: the store picked at startup, the completion
/// client, and the effective configuration. Both collaborators are injected
/// as trait objects so tests can substitute stubs.
pub struct AppContext {
    pub store: Arc<dyn SpecStore>,
    pub llm: Arc<dyn CompletionClient>,
    pub config: ServerConfig,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn SpecStore>,
        llm: Arc<dyn CompletionClient>,
        config: ServerConfig,
    ) -> Self {
        Self { store, llm, config }
    }
}

/// Application state type alias
pub type AppState = Arc<AppContext>;
