// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nowhere.toml` loading for the agency API.
//!
//! Every entry point returns a checked [`NowhereConfig`] or the full list of
//! problems, each pointing back into the TOML source it came from.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use model::NowhereConfig;

/// Loads the layered file lookup plus env overrides.
pub fn load_and_validate() -> Result<NowhereConfig, Vec<ConfigError>> {
    checked(loader::load_config(), || {
        loader::config_files()
            .into_iter()
            .rev()
            .filter_map(|path| read_source(&path))
            .collect()
    })
}

/// Loads one explicit file plus env overrides.
pub fn load_and_validate_path(path: &Path) -> Result<NowhereConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Loads an inline document with no files and no env.
pub fn load_and_validate_str(toml_content: &str) -> Result<NowhereConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Sources are only read when extraction failed and spans need resolving.
fn checked(
    loaded: Result<NowhereConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<NowhereConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Names relative files the way figment reports them: joined onto the cwd.
fn read_source(path: &Path) -> Option<(String, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    let shown = match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };
    Some((shown.display().to_string(), content))
}
