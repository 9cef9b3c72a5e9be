// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Nowhere agency backend.
//!
//! Handlers are thin: they extract the request, call the matching
//! [`Agency`](nowhere_agency::Agency) orchestrator and wrap the result in the
//! `{success, message, data}` envelope. Errors map to 422 (validation),
//! 404 (not found) or 500 (everything else).

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use response::{ApiError, ApiResponse};
pub use server::{GatewayState, ServerConfig, router, start_server};
