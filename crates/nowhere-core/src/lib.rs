// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Nowhere agency API.
//!
//! This crate provides the foundational trait definitions, error types, and
//! store query types used throughout the workspace. Storage, language-model
//! and mail adapters implement traits defined here.

pub mod error;
pub mod patch;
pub mod query;
pub mod time;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NowhereError;
pub use patch::Patch;
pub use query::{Document, FieldUpdate, Filter, FilterValue, FindQuery, Predicate, SortDirection};
pub use types::{
    AdapterType, HealthStatus, OutboundEmail, ProviderMessage, ProviderRequest, ProviderResponse,
    TokenUsage,
};

// Re-export all adapter traits at crate root.
pub use traits::{DocumentStore, MailTransport, PluginAdapter, ProviderAdapter};
