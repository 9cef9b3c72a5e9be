// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::NowhereConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &NowhereConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must be between 1 and 65535".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if !(1..=300).contains(&config.llm.timeout_secs) {
        fail(format!(
            "llm.timeout_secs must be between 1 and 300, got {}",
            config.llm.timeout_secs
        ));
    }

    if config.llm.max_tokens == 0 {
        fail("llm.max_tokens must be greater than 0".to_string());
    }

    for (key, value) in [
        ("email.sender_email", &config.email.sender_email),
        ("email.admin_email", &config.email.admin_email),
    ] {
        if !looks_like_address(value) {
            fail(format!("{key} `{value}` is not a valid email address"));
        }
    }

    if config.email.queue_capacity == 0 {
        fail("email.queue_capacity must be greater than 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn looks_like_address(value: &str) -> bool {
    match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.contains('@')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &NowhereConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&NowhereConfig::default()).is_ok());
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = NowhereConfig::default();
        config.llm.timeout_secs = 0;
        assert!(messages(&config).iter().any(|m| m.contains("llm.timeout_secs")));
    }

    #[test]
    fn bad_admin_email_fails_validation() {
        let mut config = NowhereConfig::default();
        config.email.admin_email = "not-an-address".into();
        assert!(messages(&config).iter().any(|m| m.contains("email.admin_email")));
    }

    #[test]
    fn all_failures_are_collected() {
        let mut config = NowhereConfig::default();
        config.server.host = String::new();
        config.storage.database_path = "  ".into();
        config.email.queue_capacity = 0;
        assert_eq!(messages(&config).len(), 3);
    }
}
