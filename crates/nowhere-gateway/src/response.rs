// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response envelope and error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nowhere_core::NowhereError;
use serde::Serialize;

/// Success envelope: `{success: true, message, data?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Error body: `{success: false, message}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    /// Maps an orchestrator error. `context` is the client-facing message for
    /// server-side failures; their details are logged, not returned.
    pub fn from_error(err: NowhereError, context: &'static str) -> Self {
        match err {
            NowhereError::Validation(message) => Self::validation(message),
            NowhereError::NotFound { entity, .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: format!("{} not found", capitalize(&entity)),
            },
            other => {
                tracing::error!(error = %other, "{context}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: context.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                success: false,
                message: self.message,
            }),
        )
            .into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shorthand for handlers: `result.context("Failed to ...")?`.
pub trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, NowhereError> {
    fn context(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_error(e, context))
    }
}
