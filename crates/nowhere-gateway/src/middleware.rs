// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request logging and page-view counting.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use crate::server::GatewayState;

/// Counts every `GET` as a page view for today, then logs the request line
/// with status and elapsed time. Counting is best effort.
pub async fn track_requests(
    State(state): State<GatewayState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method == Method::GET {
        state.agency.record_page_view().await;
    }

    let response = next.run(request).await;
    info!(
        "{method} {path} - {} - {:.3}s",
        response.status().as_u16(),
        started.elapsed().as_secs_f64()
    );
    response
}
