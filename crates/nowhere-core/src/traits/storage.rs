// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store trait: the entity store adapter contract.

use async_trait::async_trait;

use crate::error::NowhereError;
use crate::query::{Document, FieldUpdate, Filter, FindQuery};
use crate::traits::adapter::PluginAdapter;

/// Collection-oriented persistence for JSON documents keyed by a string `id`.
///
/// No operation spans more than one document atomically, with the exception
/// that each single-document operation is itself atomic.
#[async_trait]
pub trait DocumentStore: PluginAdapter {
    /// Opens the backend and applies pending migrations.
    async fn initialize(&self) -> Result<(), NowhereError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), NowhereError>;

    /// Inserts a document and returns its `id` field.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, NowhereError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, NowhereError>;

    /// Returns matching documents sorted by `query.sort_key`, then paged.
    async fn find_many(
        &self,
        collection: &str,
        query: &FindQuery,
    ) -> Result<Vec<Document>, NowhereError>;

    /// Applies `updates` to the first matching document and refreshes its
    /// `updated_at`. Returns the matched count (0 or 1).
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        updates: &[FieldUpdate],
    ) -> Result<u64, NowhereError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, NowhereError>;

    /// Atomically adds `by` to a numeric field of the first matching
    /// document. Returns the matched count (0 or 1).
    async fn increment(
        &self,
        collection: &str,
        filter: &Filter,
        field: &str,
        by: i64,
    ) -> Result<u64, NowhereError>;

    /// Atomically adds `by` to `field` of the document `id`, inserting `seed`
    /// (with `field` set to `by`) when the document does not exist yet.
    async fn upsert_increment(
        &self,
        collection: &str,
        id: &str,
        seed: Document,
        field: &str,
        by: i64,
    ) -> Result<(), NowhereError>;
}
