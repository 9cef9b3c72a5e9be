// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nowhere serve`: wires the store, model client, mailer, and HTTP gateway.
//!
//! Every process-wide handle is built here once, passed down explicitly, and
//! torn down in reverse order after the server stops.

use std::sync::Arc;

use nowhere_agency::{Agency, Assistant, NotificationDispatcher};
use nowhere_anthropic::AnthropicProvider;
use nowhere_config::NowhereConfig;
use nowhere_core::{DocumentStore, MailTransport, NowhereError};
use nowhere_email::{EmailTemplates, SmtpMailer};
use nowhere_gateway::{GatewayState, ServerConfig, start_server};
use nowhere_storage::SqliteStore;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the API server until SIGINT or SIGTERM.
pub async fn run_serve(config: NowhereConfig) -> Result<(), NowhereError> {
    init_tracing(&config.app.log_level);

    info!(
        service = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        "starting nowhere"
    );

    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    let store: Arc<dyn DocumentStore> = Arc::new(store);
    info!(path = %config.storage.database_path, "storage ready");

    let provider = Arc::new(AnthropicProvider::new(&config.llm)?);
    let assistant = Assistant::from_config(provider, &config.llm);

    let mailer: Arc<dyn MailTransport> = Arc::new(SmtpMailer::new(&config.email)?);
    if !mailer.is_configured() {
        warn!("SMTP is not configured, outbound email will be skipped");
    }
    let dispatcher = Arc::new(NotificationDispatcher::start(
        mailer,
        EmailTemplates::new(&config.email.sender_email, &config.email.admin_email),
        config.email.queue_capacity,
    ));

    let agency = Agency::new(store.clone(), assistant, dispatcher.clone());
    let state = GatewayState::new(agency, config.app.name.as_str());
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        cors_origins: config.server.cors_origins.clone(),
    };

    let cancel = shutdown::install_signal_handler();
    let served = start_server(&server_config, state, cancel).await;

    info!("draining notification queue");
    dispatcher.shutdown().await;
    if let Err(e) = store.close().await {
        warn!(error = %e, "failed to close storage cleanly");
    }
    info!("nowhere stopped");

    served
}

/// Initializes the global tracing subscriber. `RUST_LOG` wins when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nowhere={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
