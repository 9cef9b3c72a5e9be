// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail transport that records instead of sending.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use nowhere_core::{
    AdapterType, HealthStatus, MailTransport, NowhereError, OutboundEmail, PluginAdapter,
};

/// Captures every email handed to it. Can be switched to fail every send.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    failing: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with an email error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Emails delivered so far, in delivery order.
    pub async fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for RecordingTransport {
    fn name(&self) -> &str {
        "recording-transport"
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
impl MailTransport for RecordingTransport {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send(&self, email: &OutboundEmail) -> Result<bool, NowhereError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NowhereError::Email {
                message: "recording transport set to fail".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(email.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            to: "a@x.com".into(),
            subject: "s".into(),
            html_body: "<p>b</p>".into(),
        }
    }

    #[tokio::test]
    async fn records_and_fails_on_demand() {
        let transport = RecordingTransport::new();
        assert!(transport.send(&email()).await.unwrap());
        transport.set_failing(true);
        assert!(transport.send(&email()).await.is_err());
        assert_eq!(transport.sent().await.len(), 1);
    }
}
