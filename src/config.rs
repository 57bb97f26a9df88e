// Copyright (c) 2025 - Cowboy AI, Inc.
//! Client configuration
//!
//! Values come from serde (config files, fixtures) or from the environment
//! via [`ClientConfig::from_env`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{SyncError, SyncResult};

/// Configuration for talking to the matching API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, including any version prefix (e.g., "http://localhost:3000/api/v1")
    pub base_url: String,

    /// Bearer token for the current session, supplied by the auth collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Countdown refresh interval in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    5_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/v1".to_string(),
            bearer_token: None,
            timeout_secs: default_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to [`ClientConfig::default`]; set but
    /// unparsable numbers are a configuration error.
    pub fn from_env() -> SyncResult<Self> {
        let defaults = Self::default();

        let base_url = std::env::var("MATCHING_API_URL").unwrap_or(defaults.base_url);
        let bearer_token = std::env::var("MATCHING_API_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());
        let timeout_secs = parse_env("MATCHING_TIMEOUT_SECS", defaults.timeout_secs)?;
        let poll_interval_ms = parse_env("MATCHING_POLL_INTERVAL_MS", defaults.poll_interval_ms)?;

        let config = Self {
            base_url,
            bearer_token,
            timeout_secs,
            poll_interval_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would otherwise fail much later
    pub fn validate(&self) -> SyncResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SyncError::Configuration(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(SyncError::Configuration(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Join the base URL and an API path without doubling slashes
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_env(key: &str, default: u64) -> SyncResult<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SyncError::Configuration(format!("{key}={raw}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    const VARS: [&str; 4] = [
        "MATCHING_API_URL",
        "MATCHING_API_TOKEN",
        "MATCHING_TIMEOUT_SECS",
        "MATCHING_POLL_INTERVAL_MS",
    ];

    // Tests run on parallel threads and share one process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clean_env_vars();
        guard
    }

    #[test]
    fn test_from_env_defaults() {
        let _env = clean_env();
        assert_eq!(ClientConfig::from_env().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_from_env_reads_variables() {
        let _env = clean_env();
        std::env::set_var("MATCHING_API_URL", "https://api.example.com/v1");
        std::env::set_var("MATCHING_API_TOKEN", "secret");
        std::env::set_var("MATCHING_TIMEOUT_SECS", " 12 ");
        std::env::set_var("MATCHING_POLL_INTERVAL_MS", "1000");

        let config = ClientConfig::from_env().unwrap();

        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.bearer_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout(), Duration::from_secs(12));
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        clean_env_vars();
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let _env = clean_env();
        std::env::set_var("MATCHING_TIMEOUT_SECS", "soon");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(SyncError::Configuration(ref m)) if m.starts_with("MATCHING_TIMEOUT_SECS=soon")
        ));

        std::env::remove_var("MATCHING_TIMEOUT_SECS");
        std::env::set_var("MATCHING_POLL_INTERVAL_MS", "0");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(SyncError::Configuration(_))
        ));

        std::env::remove_var("MATCHING_POLL_INTERVAL_MS");
        std::env::set_var("MATCHING_API_TOKEN", "");
        assert_eq!(ClientConfig::from_env().unwrap().bearer_token, None);
        clean_env_vars();
    }

    fn clean_env_vars() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"https://api.example.com"}"#).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.poll_interval_ms, 5_000);
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn test_url_for_joins_cleanly() {
        let config = ClientConfig {
            base_url: "http://localhost:3000/api/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.url_for("/review"),
            "http://localhost:3000/api/v1/review"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClientConfig {
            base_url: "ftp://nowhere".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SyncError::Configuration(_))));

        let config = ClientConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
