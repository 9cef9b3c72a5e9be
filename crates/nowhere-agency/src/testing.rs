// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-crate test doubles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nowhere_config::model::StorageConfig;
use nowhere_core::{
    AdapterType, DocumentStore, HealthStatus, MailTransport, NowhereError, OutboundEmail,
    PluginAdapter, ProviderAdapter, ProviderRequest, ProviderResponse, TokenUsage,
};
use nowhere_email::EmailTemplates;
use nowhere_storage::SqliteStore;

use crate::assistant::Assistant;
use crate::dispatcher::NotificationDispatcher;
use crate::orchestrators::Agency;

pub async fn store() -> (Arc<dyn DocumentStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(StorageConfig {
        database_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        wal_mode: true,
    });
    store.initialize().await.unwrap();
    (Arc::new(store), dir)
}

/// What the scripted provider does on its next call.
pub enum Step {
    Reply(&'static str),
    Fail,
    Stall,
}

/// Provider replaying scripted steps, then echoing "ok".
#[derive(Default)]
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PluginAdapter for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, NowhereError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NowhereError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, NowhereError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.steps.lock().unwrap().pop_front();
        let text = match step {
            Some(Step::Reply(text)) => text,
            None => "ok",
            Some(Step::Fail) => {
                return Err(NowhereError::Provider {
                    message: "scripted failure".into(),
                    source: None,
                });
            }
            Some(Step::Stall) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                "too late"
            }
        };
        Ok(ProviderResponse {
            id: "resp".into(),
            content: text.to_string(),
            model: request.model,
            stop_reason: Some("end_turn".into()),
            usage: TokenUsage::default(),
        })
    }
}

/// Mail transport recording every delivered message.
#[derive(Default)]
pub struct CaptureMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub fail: bool,
}

impl CaptureMailer {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PluginAdapter for CaptureMailer {
    fn name(&self) -> &str {
        "capture"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Email
    }

    async fn health_check(&self) -> Result<HealthStatus, NowhereError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NowhereError> {
        Ok(())
    }
}

#[async_trait]
impl MailTransport for CaptureMailer {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send(&self, email: &OutboundEmail) -> Result<bool, NowhereError> {
        if self.fail {
            return Err(NowhereError::Email {
                message: "relay rejected".into(),
                source: None,
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(true)
    }
}

pub fn templates() -> EmailTemplates {
    EmailTemplates::new("hello@nowhere.digital", "admin@nowhere.digital")
}

/// Fully wired agency over a temporary store.
pub struct Fixture {
    pub agency: Agency,
    pub store: Arc<dyn DocumentStore>,
    pub provider: Arc<ScriptedProvider>,
    pub mailer: Arc<CaptureMailer>,
    pub dispatcher: Arc<NotificationDispatcher>,
    _dir: tempfile::TempDir,
}

impl Fixture {
    pub async fn new(steps: Vec<Step>) -> Self {
        let (store, dir) = store().await;
        let provider = Arc::new(ScriptedProvider::new(steps));
        let mailer = Arc::new(CaptureMailer::default());
        let dispatcher = Arc::new(NotificationDispatcher::start(
            mailer.clone(),
            templates(),
            16,
        ));
        let assistant = Assistant::new(provider.clone(), Duration::from_millis(200), 256);
        let agency = Agency::new(store.clone(), assistant, dispatcher.clone());
        Self {
            agency,
            store,
            provider,
            mailer,
            dispatcher,
            _dir: dir,
        }
    }

    /// Waits for queued email to be delivered and returns it.
    pub async fn delivered(&self) -> Vec<OutboundEmail> {
        self.dispatcher.shutdown().await;
        self.mailer.sent()
    }
}
