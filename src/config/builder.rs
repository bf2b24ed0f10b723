//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The store connection string is the only required field; `build()` exists
//! only once it has been provided.

use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::{ConfigError, ScrapeConfig};
use crate::utils::{
    DEFAULT_BACKUP_FILE, DEFAULT_COLLECTION_NAME, DEFAULT_REFRESH_MAX, DEFAULT_RELOAD_SETTLE_MS,
    DEFAULT_REQUEST_DELAY_MS, DETAIL_FETCH_TIMEOUT_SECS, MAX_LINKS_PER_CATEGORY,
    default_category_urls, is_valid_url,
};

// Type states for the builder
pub struct WithStoreUrl;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) store_url: Option<String>,
    pub(crate) collection_name: String,
    pub(crate) category_urls: Vec<String>,
    pub(crate) refresh_max: usize,
    pub(crate) max_links_per_category: usize,
    pub(crate) reload_settle_ms: u64,
    pub(crate) request_delay_ms: u64,
    pub(crate) fetch_timeout_secs: u64,
    pub(crate) backup_path: PathBuf,
    pub(crate) headless: bool,
    pub(crate) chrome_executable: Option<PathBuf>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            store_url: None,
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            category_urls: default_category_urls(),
            refresh_max: DEFAULT_REFRESH_MAX,
            max_links_per_category: MAX_LINKS_PER_CATEGORY,
            reload_settle_ms: DEFAULT_RELOAD_SETTLE_MS,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            fetch_timeout_secs: DETAIL_FETCH_TIMEOUT_SECS,
            backup_path: PathBuf::from(DEFAULT_BACKUP_FILE),
            headless: true,
            chrome_executable: None,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn store_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithStoreUrl> {
        ScrapeConfigBuilder {
            store_url: Some(url.into()),
            collection_name: self.collection_name,
            category_urls: self.category_urls,
            refresh_max: self.refresh_max,
            max_links_per_category: self.max_links_per_category,
            reload_settle_ms: self.reload_settle_ms,
            request_delay_ms: self.request_delay_ms,
            fetch_timeout_secs: self.fetch_timeout_secs,
            backup_path: self.backup_path,
            headless: self.headless,
            chrome_executable: self.chrome_executable,
            _phantom: PhantomData,
        }
    }
}

impl<State> ScrapeConfigBuilder<State> {
    #[must_use]
    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    #[must_use]
    pub fn category_urls(mut self, urls: Vec<String>) -> Self {
        self.category_urls = urls;
        self
    }

    #[must_use]
    pub fn refresh_max(mut self, refresh_max: usize) -> Self {
        self.refresh_max = refresh_max;
        self
    }

    #[must_use]
    pub fn max_links_per_category(mut self, max: usize) -> Self {
        self.max_links_per_category = max;
        self
    }

    #[must_use]
    pub fn reload_settle_ms(mut self, ms: u64) -> Self {
        self.reload_settle_ms = ms;
        self
    }

    #[must_use]
    pub fn request_delay_ms(mut self, ms: u64) -> Self {
        self.request_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn backup_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_path = path.into();
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_executable(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_executable = path;
        self
    }
}

impl ScrapeConfigBuilder<WithStoreUrl> {
    /// Validate and build the final configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the store URL is blank, the collection
    /// name is not a plain identifier, a category URL is not absolute
    /// http(s), or a limit is zero.
    pub fn build(self) -> Result<ScrapeConfig, ConfigError> {
        let store_url = self
            .store_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingStoreUrl)?;

        if !is_plain_identifier(&self.collection_name) {
            return Err(ConfigError::invalid(
                "collection_name",
                format!("'{}' must be ASCII letters, digits or '_'", self.collection_name),
            ));
        }

        if let Some(bad) = self.category_urls.iter().find(|u| !is_valid_url(u)) {
            return Err(ConfigError::invalid(
                "category_urls",
                format!("'{bad}' is not an absolute http(s) URL"),
            ));
        }

        if self.refresh_max == 0 {
            return Err(ConfigError::invalid("refresh_max", "must be at least 1"));
        }
        if self.max_links_per_category == 0 {
            return Err(ConfigError::invalid(
                "max_links_per_category",
                "must be at least 1",
            ));
        }

        Ok(ScrapeConfig {
            store_url,
            collection_name: self.collection_name,
            category_urls: self.category_urls,
            refresh_max: self.refresh_max,
            max_links_per_category: self.max_links_per_category,
            reload_settle_ms: self.reload_settle_ms,
            request_delay_ms: self.request_delay_ms,
            fetch_timeout_secs: self.fetch_timeout_secs,
            backup_path: self.backup_path,
            headless: self.headless,
            chrome_executable: self.chrome_executable,
        })
    }
}

/// Table names are interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` passes.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
