//! Configuration module for the portal.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Data gateway endpoint (read snapshot / upsert record)
    pub gateway_url: String,
    /// Reviewer secret; admin login is disabled when unset
    pub admin_password: Option<String>,
    /// Generative text API key; AI features fall back when unset
    pub ai_api_key: Option<String>,
    /// Generative text API base URL
    pub ai_base_url: String,
    /// Generative text model name
    pub ai_model: String,
    /// Delay before re-reading the snapshot after a successful save
    pub refresh_delay: Duration,
    /// Address to bind the portal to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Invalid configuration value.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid value for {}: {}", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let gateway_url = env::var("PORTAL_GATEWAY_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8081/exec".to_string());

        let admin_password = env::var("PORTAL_ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty());

        let ai_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|s| !s.is_empty());

        let ai_base_url = env::var("PORTAL_AI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let ai_model =
            env::var("PORTAL_AI_MODEL").unwrap_or_else(|_| "gemini-3-flash-preview".to_string());

        let refresh_delay = match env::var("PORTAL_REFRESH_DELAY_MS") {
            Ok(raw) => Duration::from_millis(raw.parse().map_err(|_| ConfigError {
                key: "PORTAL_REFRESH_DELAY_MS",
                value: raw.clone(),
            })?),
            Err(_) => Duration::from_millis(1500),
        };

        let bind_addr = match env::var("PORTAL_BIND_ADDR") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError {
                key: "PORTAL_BIND_ADDR",
                value: raw.clone(),
            })?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 8080)),
        };

        let log_level = env::var("PORTAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            gateway_url,
            admin_password,
            ai_api_key,
            ai_base_url,
            ai_model,
            refresh_delay,
            bind_addr,
            log_level,
        })
    }
}
