//! Environment-driven configuration loading
//!
//! Variables:
//! - `RECIPE_STORE_URL` (falls back to `DATABASE_URL`) (required)
//! - `COLLECTION_NAME`: store table, default `recipes`
//! - `RECIPE_BACKUP_PATH`: CSV backup file
//! - `RECIPE_REFRESH_MAX`: listing reload ceiling
//! - `RECIPE_HEADLESS`: `false`/`0` to show the browser window
//! - `CHROMIUM_PATH`, `GOOGLE_CHROME_BIN`, `CHROME_BIN`: browser executable

use std::path::PathBuf;

use super::types::{ConfigError, ScrapeConfig};

const STORE_URL_KEYS: &[&str] = &["RECIPE_STORE_URL", "DATABASE_URL"];
const CHROME_BIN_KEYS: &[&str] = &["CHROMIUM_PATH", "GOOGLE_CHROME_BIN", "CHROME_BIN"];

impl ScrapeConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingStoreUrl`] when no store connection string is
    /// set, [`ConfigError::InvalidValue`] for unparsable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`ScrapeConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let first_of = |keys: &[&str]| keys.iter().find_map(|k| get(*k));

        let store_url = first_of(STORE_URL_KEYS).ok_or(ConfigError::MissingStoreUrl)?;

        let mut builder = ScrapeConfig::builder().store_url(store_url);

        if let Some(name) = get("COLLECTION_NAME") {
            builder = builder.collection_name(name);
        }
        if let Some(path) = get("RECIPE_BACKUP_PATH") {
            builder = builder.backup_path(path);
        }
        if let Some(raw) = get("RECIPE_REFRESH_MAX") {
            let refresh_max = raw
                .parse::<usize>()
                .map_err(|e| ConfigError::invalid("RECIPE_REFRESH_MAX", e.to_string()))?;
            builder = builder.refresh_max(refresh_max);
        }
        if let Some(raw) = get("RECIPE_HEADLESS") {
            builder = builder.headless(parse_bool("RECIPE_HEADLESS", &raw)?);
        }

        builder
            .chrome_executable(first_of(CHROME_BIN_KEYS).map(PathBuf::from))
            .build()
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(key, format!("'{other}' is not a boolean"))),
    }
}
