// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail transport trait for outbound email.

use async_trait::async_trait;

use crate::error::NowhereError;
use crate::traits::adapter::PluginAdapter;
use crate::types::OutboundEmail;

/// Adapter for an outbound email transport.
#[async_trait]
pub trait MailTransport: PluginAdapter {
    /// Whether credentials are present. An unconfigured transport never sends.
    fn is_configured(&self) -> bool;

    /// Delivers one email.
    ///
    /// Returns `Ok(true)` when accepted by the relay, `Ok(false)` when the
    /// transport is unconfigured and the call was a no-op, and `Err` when
    /// delivery was attempted and failed.
    async fn send(&self, email: &OutboundEmail) -> Result<bool, NowhereError>;
}
