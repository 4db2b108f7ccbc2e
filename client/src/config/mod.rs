//! Central module for client-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the API base URL, request timeout, and the path of the persisted session
//! file.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub gps_enabled: bool,
    pub session_file: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let request_timeout_seconds = env::var("REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECONDS must be a valid number")?;

        // Anything other than the literal "false" leaves GPS-location
        // capture enabled.
        let gps_enabled = env::var("GPS_ENABLED")
            .map(|v| v != "false")
            .unwrap_or(true);

        let session_file = match env::var("SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => expanduser::expanduser("~/.config/starter/session.json")
                .context("Failed to resolve home directory for session file")?,
        };

        Ok(Config {
            api_base_url,
            request_timeout_seconds,
            gps_enabled,
            session_file,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_seconds: 10,
            gps_enabled: true,
            session_file: PathBuf::from("session.json"),
        }
    }
}
