//! Client Configuration Settings
//!
//! Configuration types for the `xStation5` client, loaded from environment
//! variables or assembled in code.

use std::time::Duration;

use crate::domain::account::{Credentials, DEFAULT_HOST};

/// WebSocket transport settings.
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Connection establishment timeout (TCP + TLS + WebSocket upgrade).
    pub connect_timeout: Duration,
    /// Minimum spacing between outbound commands on one connection.
    pub request_interval: Duration,
    /// Protocol-level ping interval keeping idle connections alive.
    pub keep_alive_interval: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_interval: Duration::from_millis(200),
            keep_alive_interval: Duration::from_secs(20),
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account credentials.
    pub credentials: Credentials,
    /// Account type name, validated at login ("demo" or "real").
    pub account_type: String,
    /// Server host, with or without a `wss://` scheme.
    pub host: String,
    /// Whether trade execution is blocked (on by default).
    pub safe_mode: bool,
    /// WebSocket transport settings.
    pub transport: TransportSettings,
}

impl ClientConfig {
    /// Create a configuration for the production host with safe mode on and
    /// default transport settings.
    #[must_use]
    pub fn new(credentials: Credentials, account_type: impl Into<String>) -> Self {
        Self {
            credentials,
            account_type: account_type.into(),
            host: DEFAULT_HOST.to_string(),
            safe_mode: true,
            transport: TransportSettings::default(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `XSTATION_ACCOUNT_ID` and `XSTATION_PASSWORD` are required. Optional:
    /// `XSTATION_ACCOUNT_TYPE` (default `demo`), `XSTATION_HOST`,
    /// `XSTATION_SAFE_MODE`, `XSTATION_CONNECT_TIMEOUT_SECS`,
    /// `XSTATION_REQUEST_INTERVAL_MS`, `XSTATION_KEEP_ALIVE_INTERVAL_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required environment variable is missing or
    /// empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let account_id = std::env::var("XSTATION_ACCOUNT_ID")
            .map_err(|_| ConfigError::MissingEnvVar("XSTATION_ACCOUNT_ID".to_string()))?;

        let password = std::env::var("XSTATION_PASSWORD")
            .map_err(|_| ConfigError::MissingEnvVar("XSTATION_PASSWORD".to_string()))?;

        if account_id.is_empty() {
            return Err(ConfigError::EmptyValue("XSTATION_ACCOUNT_ID".to_string()));
        }

        if password.is_empty() {
            return Err(ConfigError::EmptyValue("XSTATION_PASSWORD".to_string()));
        }

        let account_type =
            std::env::var("XSTATION_ACCOUNT_TYPE").unwrap_or_else(|_| "demo".to_string());

        let host = std::env::var("XSTATION_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let safe_mode = parse_env_bool("XSTATION_SAFE_MODE", true);

        let transport = TransportSettings {
            connect_timeout: parse_env_duration_secs(
                "XSTATION_CONNECT_TIMEOUT_SECS",
                TransportSettings::default().connect_timeout,
            ),
            request_interval: parse_env_duration_millis(
                "XSTATION_REQUEST_INTERVAL_MS",
                TransportSettings::default().request_interval,
            ),
            keep_alive_interval: parse_env_duration_secs(
                "XSTATION_KEEP_ALIVE_INTERVAL_SECS",
                TransportSettings::default().keep_alive_interval,
            ),
        };

        Ok(Self {
            credentials: Credentials::new(account_id, password),
            account_type,
            host,
            safe_mode,
            transport,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn parse_env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

fn parse_env_duration_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}
