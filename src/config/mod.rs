//! Configuration module for the archive viewer.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::AppError;

/// What to do when only one of the channel and user loads succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Both loads must succeed or nothing is shown
    #[default]
    Strict,
    /// Show whatever loaded and report the failures
    Partial,
}

impl LoadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPolicy::Strict => "strict",
            LoadPolicy::Partial => "partial",
        }
    }
}

impl FromStr for LoadPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(LoadPolicy::Strict),
            "partial" => Ok(LoadPolicy::Partial),
            other => Err(AppError::Config(format!(
                "Invalid ARCHIVE_LOAD_POLICY '{}', expected 'strict' or 'partial'",
                other
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the export: team.json, channels/ and users/
    pub data_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub load_policy: LoadPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("ARCHIVE_DATA_DIR")
            .unwrap_or_else(|_| "./data".to_string())
            .into();

        let bind_addr = env::var("ARCHIVE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr.parse().map_err(|e| {
            AppError::Config(format!("Invalid ARCHIVE_BIND_ADDR '{}': {}", bind_addr, e))
        })?;

        let log_level = env::var("ARCHIVE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let load_policy = match env::var("ARCHIVE_LOAD_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => LoadPolicy::default(),
        };

        Ok(Self {
            data_dir,
            bind_addr,
            log_level,
            load_policy,
        })
    }
}
