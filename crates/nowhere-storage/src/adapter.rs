// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`DocumentStore`] trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use nowhere_config::model::StorageConfig;
use nowhere_core::{
    AdapterType, Document, DocumentStore, FieldUpdate, Filter, FindQuery, HealthStatus,
    NowhereError, PluginAdapter,
};

use crate::database::{self, Database};
use crate::queries;

/// SQLite-backed document store.
///
/// Wraps a [`Database`] handle and delegates all operations to the query
/// modules. The database is opened by [`DocumentStore::initialize`]; every
/// other call fails with a storage error until then.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// The connection is not opened until [`DocumentStore::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, NowhereError> {
        self.db.get().ok_or_else(|| NowhereError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, NowhereError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NowhereError> {
        if self.db.get().is_some() {
            self.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn initialize(&self) -> Result<(), NowhereError> {
        let db =
            Database::open_with_options(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| NowhereError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite document store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), NowhereError> {
        let db = self.db()?;
        database::checkpoint(db.connection()).await?;
        db.connection()
            .clone()
            .close()
            .await
            .map_err(database::map_tr_err)?;
        debug!("SQLite document store closed");
        Ok(())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<String, NowhereError> {
        queries::documents::insert_document(self.db()?, collection, document).await
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, NowhereError> {
        queries::documents::find_document(self.db()?, collection, filter).await
    }

    async fn find_many(
        &self,
        collection: &str,
        query: &FindQuery,
    ) -> Result<Vec<Document>, NowhereError> {
        queries::documents::find_documents(self.db()?, collection, query).await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        updates: &[FieldUpdate],
    ) -> Result<u64, NowhereError> {
        queries::documents::update_document(self.db()?, collection, filter, updates).await
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, NowhereError> {
        queries::documents::count_documents(self.db()?, collection, filter).await
    }

    async fn increment(
        &self,
        collection: &str,
        filter: &Filter,
        field: &str,
        by: i64,
    ) -> Result<u64, NowhereError> {
        queries::counters::increment_field(self.db()?, collection, filter, field, by).await
    }

    async fn upsert_increment(
        &self,
        collection: &str,
        id: &str,
        seed: Document,
        field: &str,
        by: i64,
    ) -> Result<(), NowhereError> {
        queries::counters::upsert_increment(self.db()?, collection, id, seed, field, by).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn calls_before_initialize_fail() {
        let store = SqliteStore::new(StorageConfig {
            database_path: "/nonexistent/never-opened.db".into(),
            wal_mode: true,
        });
        let err = store.count("x", &Filter::new()).await.unwrap_err();
        assert!(err.to_string().contains("not initialized"));
        assert_eq!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy("not initialized".into())
        );
    }

    #[tokio::test]
    async fn double_initialize_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(StorageConfig {
            database_path: dir.path().join("t.db").to_string_lossy().into_owned(),
            wal_mode: true,
        });
        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        store.close().await.unwrap();
    }
}
