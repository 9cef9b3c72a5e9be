// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Nowhere integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock language model with scripted replies, failures and delays
//! - [`RecordingTransport`] - Mail transport that captures outbound email
//! - [`TestHarness`] - Temp SQLite store with every service wired

pub mod harness;
pub mod mock_provider;
pub mod recording_transport;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
pub use recording_transport::RecordingTransport;
