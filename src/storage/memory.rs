//! Volatile in-memory backend.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::Result;
use crate::model::Spec;

use super::{SpecStore, StoreKind};

/// Keyed map of specs. Writes are atomic per key; contents are lost on
/// process restart.
#[derive(Default)]
pub struct MemoryStore {
    specs: DashMap<String, Spec>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpecStore for MemoryStore {
    async fn save(&self, spec: &Spec) -> Result<()> {
        self.specs.insert(spec.id.clone(), spec.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Spec>> {
        let mut specs: Vec<Spec> = self.specs.iter().map(|r| r.value().clone()).collect();
        specs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        specs.truncate(limit);
        Ok(specs)
    }

    async fn get(&self, id: &str) -> Result<Option<Spec>> {
        Ok(self.specs.get(id).map(|r| r.value().clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.specs.remove(id);
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Volatile
    }
}
