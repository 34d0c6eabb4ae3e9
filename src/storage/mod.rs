//! Spec persistence.
//!
//! Two interchangeable backends behind one trait: a SQLite-backed table when
//! `DATABASE_URL` is configured, a process-local map otherwise. The backend
//! is chosen exactly once at startup; callers never branch on which is
//! active.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::errors::Result;
use crate::model::Spec;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Which backend is active; feeds the `/api/status` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Durable,
    Volatile,
}

impl StoreKind {
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Durable => "healthy",
            Self::Volatile => "in-memory",
        }
    }
}

/// Persistence contract shared by both backends.
///
/// `save` is an upsert (last write wins per id). `delete` on an absent id is
/// a no-op, never an error.
#[async_trait]
pub trait SpecStore: Send + Sync {
    /// Insert or overwrite the record at `spec.id`.
    async fn save(&self, spec: &Spec) -> Result<()>;

    /// Up to `limit` specs ordered by timestamp descending. Ties broken by
    /// id descending so the ordering is deterministic.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Spec>>;

    /// Fetch a spec by id.
    async fn get(&self, id: &str) -> Result<Option<Spec>>;

    /// Remove the record if present.
    async fn delete(&self, id: &str) -> Result<()>;

    fn kind(&self) -> StoreKind;
}

/// Build the store selected by configuration.
pub async fn connect(config: &ServerConfig) -> anyhow::Result<Arc<dyn SpecStore>> {
    match &config.database_url {
        Some(url) => {
            let store = SqliteStore::connect(url).await?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(MemoryStore::new())),
    }
}
