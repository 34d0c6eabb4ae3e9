//! SQLite persistence for specs.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::errors::{AppError, Result};
use crate::model::Spec;

use super::{SpecStore, StoreKind};

/// Durable backend keyed by spec id. `form_data` and `tasks` are stored as
/// serialized JSON text and deserialized on read, so the row layout stays
/// flat: `(id, timestamp, form_data, tasks)`.
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct SpecRow {
    id: String,
    timestamp: i64,
    form_data: String,
    tasks: String,
}

impl SpecRow {
    fn into_spec(self) -> Result<Spec> {
        Ok(Spec {
            form_data: serde_json::from_str(&self.form_data)
                .map_err(|e| AppError::Storage(format!("corrupt form_data row: {e}")))?,
            tasks: serde_json::from_str(&self.tasks)
                .map_err(|e| AppError::Storage(format!("corrupt tasks row: {e}")))?,
            id: self.id,
            timestamp: self.timestamp,
        })
    }
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url` and ensure the
    /// schema exists.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // Single connection: SQLite allows one writer at a time, and a
        // multi-connection pool against `sqlite::memory:` would hand each
        // connection its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS specs (
                 id TEXT PRIMARY KEY,
                 timestamp INTEGER NOT NULL,
                 form_data TEXT NOT NULL,
                 tasks TEXT NOT NULL
             )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SpecStore for SqliteStore {
    async fn save(&self, spec: &Spec) -> Result<()> {
        let form_data = serde_json::to_string(&spec.form_data)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let tasks =
            serde_json::to_string(&spec.tasks).map_err(|e| AppError::Storage(e.to_string()))?;

        sqlx::query(
            "INSERT INTO specs (id, timestamp, form_data, tasks) VALUES (?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                 timestamp = excluded.timestamp, \
                 form_data = excluded.form_data, \
                 tasks = excluded.tasks",
        )
        .bind(&spec.id)
        .bind(spec.timestamp)
        .bind(&form_data)
        .bind(&tasks)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Spec>> {
        let rows: Vec<SpecRow> = sqlx::query_as(
            "SELECT id, timestamp, form_data, tasks FROM specs \
             ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

        rows.into_iter().map(SpecRow::into_spec).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Spec>> {
        let row: Option<SpecRow> =
            sqlx::query_as("SELECT id, timestamp, form_data, tasks FROM specs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;

        row.map(SpecRow::into_spec).transpose()
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM specs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Durable
    }
}
