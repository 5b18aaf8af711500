//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading: required variables must be present and valid or the
//! process exits with a clear message before binding any sockets.

use std::env;
use std::time::Duration;

/// Runtime configuration for the admin API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub listen_addr: String,
    /// Base URL of the identity provider's admin API.
    pub directory_base_url: String,
    /// Service-account token for the identity provider.
    pub directory_token: String,
    /// Base URL of the resource inventory service.
    pub inventory_base_url: String,
    /// Token for the resource inventory service.
    pub inventory_token: String,
    /// Base URL of the system-message store.
    pub message_store_base_url: String,
    /// Token for the system-message store.
    pub message_store_token: String,
    /// Path to the pinned license-verification certificate (PEM).
    pub license_certificate_path: String,
    /// Timeout applied to collaborator HTTP calls.
    pub http_timeout: Duration,
    /// Interval between periodic license re-evaluations.
    pub reevaluate_interval: Duration,
    /// Log filter directive (e.g. "info,custos=debug").
    pub log_filter: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Returns an error string naming the first missing or invalid
    /// variable.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            directory_base_url: required("DIRECTORY_BASE_URL")?,
            directory_token: required("DIRECTORY_TOKEN")?,
            inventory_base_url: required("INVENTORY_BASE_URL")?,
            inventory_token: required("INVENTORY_TOKEN")?,
            message_store_base_url: required("MESSAGE_STORE_BASE_URL")?,
            message_store_token: required("MESSAGE_STORE_TOKEN")?,
            license_certificate_path: required("LICENSE_CERT_PATH")?,
            http_timeout: Duration::from_secs(duration_secs("HTTP_TIMEOUT_SECS", 30)?),
            reevaluate_interval: Duration::from_secs(duration_secs(
                "REEVALUATE_INTERVAL_SECS",
                300,
            )?),
            log_filter: env::var("LOG_FILTER").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{name} must be set")),
    }
}

fn duration_secs(name: &str, default: u64) -> Result<u64, String> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| format!("{name} must be a number of seconds, got '{value}'")),
        Err(_) => Ok(default),
    }
}
