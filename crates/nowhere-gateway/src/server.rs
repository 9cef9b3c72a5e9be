// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::{Router, middleware as axum_middleware};
use nowhere_agency::Agency;
use nowhere_core::NowhereError;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;
use crate::middleware::track_requests;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub agency: Agency,
    /// Reported by the health endpoint.
    pub service_name: Arc<str>,
}

impl GatewayState {
    pub fn new(agency: Agency, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            agency,
            service_name: service_name.into(),
        }
    }
}

/// Server bind and CORS settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed origins; `*` allows any.
    pub cors_origins: Vec<String>,
}

/// Builds the application router with every route and middleware layer.
pub fn router(state: GatewayState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/contact",
            post(handlers::submit_contact).get(handlers::list_contacts),
        )
        .route("/contact/{id}", put(handlers::update_contact))
        .route("/chat/session", post(handlers::open_chat_session))
        .route("/chat/message", post(handlers::send_chat_message))
        .route("/chat/history/{session_id}", get(handlers::chat_history))
        .route("/content/generate", post(handlers::generate_content))
        .route("/content/recommendations", get(handlers::recommendations))
        .route("/content/market-trends", get(handlers::market_trends))
        .route("/content/strategy", post(handlers::strategy_proposal))
        .route(
            "/portfolio",
            post(handlers::create_portfolio_item).get(handlers::list_portfolio),
        )
        .route("/portfolio/{id}", put(handlers::update_portfolio_item))
        .route(
            "/bookings",
            post(handlers::create_booking).get(handlers::list_bookings),
        )
        .route("/bookings/{id}", put(handlers::update_booking))
        .route(
            "/services",
            post(handlers::create_service).get(handlers::list_services),
        )
        .route("/services/{id}", put(handlers::update_service))
        .route(
            "/testimonials",
            post(handlers::create_testimonial).get(handlers::list_testimonials),
        )
        .route("/testimonials/{id}", put(handlers::update_testimonial))
        .route("/analytics/summary", get(handlers::analytics_summary));

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serves the API until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), NowhereError> {
    let app = router(state, &config.cors_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NowhereError::Internal(format!("failed to bind server to {addr}: {e}")))?;

    info!("API server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| NowhereError::Internal(format!("server error: {e}")))?;

    info!("API server stopped");
    Ok(())
}
