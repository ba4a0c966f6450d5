//! Central module for client-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the API base URL, request timeouts, and the session file location.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub redirect_delay_ms: u64,
    pub session_file: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let request_timeout_seconds = env::var("REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECONDS must be a valid number")?;

        let redirect_delay_ms = env::var("REDIRECT_DELAY_MS")
            .unwrap_or_else(|_| "1500".to_string())
            .parse::<u64>()
            .context("REDIRECT_DELAY_MS must be a valid number")?;

        let session_file = env::var("SESSION_FILE")
            .unwrap_or_else(|_| "~/.ordersys/session.json".to_string());
        let session_file = expanduser::expanduser(&session_file)
            .context("SESSION_FILE path could not be expanded")?;

        Ok(Config {
            api_base_url,
            request_timeout_seconds,
            redirect_delay_ms,
            session_file,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Joins an absolute request path onto the configured base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}
