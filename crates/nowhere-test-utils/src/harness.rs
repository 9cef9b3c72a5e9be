// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full service stack with mock adapters and a
//! temp SQLite database.

use std::sync::Arc;
use std::time::Duration;

use nowhere_agency::{Agency, Assistant, NotificationDispatcher};
use nowhere_config::model::StorageConfig;
use nowhere_core::{DocumentStore, NowhereError};
use nowhere_email::EmailTemplates;
use nowhere_storage::SqliteStore;

use crate::mock_provider::MockProvider;
use crate::recording_transport::RecordingTransport;

pub const TEST_SENDER: &str = "hello@nowhere.digital";
pub const TEST_ADMIN: &str = "admin@nowhere.digital";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    llm_timeout: Duration,
    queue_capacity: usize,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            llm_timeout: Duration::from_secs(2),
            queue_capacity: 64,
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Set the language-model timeout.
    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }

    /// Set the email queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, NowhereError> {
        let temp_dir = tempfile::TempDir::new().map_err(NowhereError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        });
        store.initialize().await?;
        let store: Arc<dyn DocumentStore> = Arc::new(store);

        let provider = Arc::new(MockProvider::with_responses(self.responses));
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = Arc::new(NotificationDispatcher::start(
            transport.clone(),
            EmailTemplates::new(TEST_SENDER, TEST_ADMIN),
            self.queue_capacity,
        ));
        let assistant = Assistant::new(provider.clone(), self.llm_timeout, 1024);
        let agency = Agency::new(store.clone(), assistant, dispatcher.clone());

        Ok(TestHarness {
            agency,
            store,
            provider,
            transport,
            dispatcher,
            _temp_dir: temp_dir,
        })
    }
}

/// Full service stack over a temp database.
pub struct TestHarness {
    pub agency: Agency,
    pub store: Arc<dyn DocumentStore>,
    pub provider: Arc<MockProvider>,
    pub transport: Arc<RecordingTransport>,
    pub dispatcher: Arc<NotificationDispatcher>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with default options.
    pub async fn new() -> Result<Self, NowhereError> {
        Self::builder().build().await
    }

    /// Drains the email queue and returns everything delivered.
    ///
    /// Stops the dispatcher; later notifications are dropped.
    pub async fn delivered_email(&self) -> Vec<nowhere_core::OutboundEmail> {
        self.dispatcher.shutdown().await;
        self.transport.sent().await
    }
}
