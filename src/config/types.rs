//! Core configuration types for a scrape run
//!
//! This module contains the `ScrapeConfig` struct and the error type raised
//! while building or loading it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Store connection string, e.g. `sqlite://recipes.db`.
    ///
    /// Required: a run never starts without it.
    pub(crate) store_url: String,

    /// Table holding recipe records. Validated as a plain SQL identifier.
    pub(crate) collection_name: String,

    /// Absolute category listing URLs, processed in order
    pub(crate) category_urls: Vec<String>,

    pub(crate) refresh_max: usize,
    pub(crate) max_links_per_category: usize,
    pub(crate) reload_settle_ms: u64,
    pub(crate) request_delay_ms: u64,
    pub(crate) fetch_timeout_secs: u64,
    pub(crate) backup_path: PathBuf,
    pub(crate) headless: bool,

    /// Explicit browser executable. When `None`, discovery runs through
    /// environment variables and well-known install paths.
    pub(crate) chrome_executable: Option<PathBuf>,
}

/// Errors raised while assembling a [`ScrapeConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No store connection string was supplied
    #[error("store connection string is not set (RECIPE_STORE_URL or DATABASE_URL)")]
    MissingStoreUrl,

    /// A value could not be parsed or is out of range
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
