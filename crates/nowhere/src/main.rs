// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NOWHERE Digital agency API.
//!
//! This is the binary entry point for the API server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nowhere_config::{ConfigError, NowhereConfig};

/// NOWHERE Digital agency API server.
#[derive(Parser, Debug)]
#[command(name = "nowhere", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server (the default).
    Serve,
    /// Validate configuration and exit.
    CheckConfig,
}

fn load(path: Option<&PathBuf>) -> Result<NowhereConfig, Vec<ConfigError>> {
    match path {
        Some(path) => nowhere_config::load_and_validate_path(path),
        None => nowhere_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            nowhere_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::CheckConfig) => {
            println!(
                "nowhere: config ok (app.name={}, server={}:{})",
                config.app.name, config.server.host, config.server.port
            );
        }
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("nowhere: {e}");
                std::process::exit(1);
            }
        }
    }
}
