// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Nowhere agency API.

use thiserror::Error;

/// The primary error type used across all adapter traits and orchestrators.
///
/// Only [`NowhereError::Validation`], [`NowhereError::NotFound`] and
/// [`NowhereError::Storage`] are expected to reach the HTTP layer; the
/// remaining variants are absorbed by best-effort call sites.
#[derive(Debug, Error)]
pub enum NowhereError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Language-model provider errors (API failure, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Outbound email errors (address parsing, SMTP rejection).
    #[error("email error: {message}")]
    Email {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Request input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A lookup or update matched no document.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NowhereError {
    /// Wraps any error as a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(err),
        }
    }

    /// Returns true when the error must be reported to the caller as a 4xx.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for NowhereError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = NowhereError::NotFound {
            entity: "portfolio item".into(),
            id: "p-1".into(),
        };
        assert_eq!(err.to_string(), "portfolio item not found: p-1");
        assert!(err.is_client_error());
    }

    #[test]
    fn storage_errors_are_server_errors() {
        let err = NowhereError::storage(std::io::Error::other("disk full"));
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("disk full"));
    }
}
