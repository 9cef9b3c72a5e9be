// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading. A local `nowhere.toml` beats the user config dir,
//! which beats `/etc/nowhere`; `NOWHERE_*` variables beat every file.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::NowhereConfig;

/// Top-level tables an env var name can start with.
const ENV_SECTIONS: &[&str] = &["storage", "server", "email", "app", "llm"];

/// Config files in merge order, lowest precedence first.
pub fn config_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from("/etc/nowhere/nowhere.toml")];
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join("nowhere/nowhere.toml"));
    }
    files.push(PathBuf::from("nowhere.toml"));
    files
}

/// Defaults, then every file from [`config_files`], then `NOWHERE_*` env vars.
pub fn load_config() -> Result<NowhereConfig, figment::Error> {
    config_files()
        .into_iter()
        .fold(defaults(), |figment, file| figment.merge(Toml::file(file)))
        .merge(env_provider())
        .extract()
}

/// Defaults plus one inline document. No files, no env.
pub fn load_config_from_str(toml_content: &str) -> Result<NowhereConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Defaults, one explicit file, then env vars.
pub fn load_config_from_path(path: &Path) -> Result<NowhereConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(NowhereConfig::default()))
}

/// Key names contain underscores, so `NOWHERE_EMAIL_SMTP_PASSWORD` is split
/// on the section only: `email.smtp_password`.
fn env_provider() -> Env {
    Env::prefixed("NOWHERE_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_first_section_only() {
        assert_eq!(map_env_key("email_smtp_password"), "email.smtp_password");
        assert_eq!(map_env_key("llm_timeout_secs"), "llm.timeout_secs");
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
        assert_eq!(map_env_key("server_port"), "server.port");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("bogus_key"), "bogus_key");
    }

    #[test]
    fn local_file_is_merged_last() {
        let files = config_files();
        assert_eq!(files.first(), Some(&PathBuf::from("/etc/nowhere/nowhere.toml")));
        assert_eq!(files.last(), Some(&PathBuf::from("nowhere.toml")));
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[server]\nport = 9000\n")?;
            jail.set_env("NOWHERE_SERVER_PORT", "9100");
            jail.set_env("NOWHERE_EMAIL_SMTP_HOST", "smtp.example.com");
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.email.smtp_host.as_deref(), Some("smtp.example.com"));
            Ok(())
        });
    }
}
