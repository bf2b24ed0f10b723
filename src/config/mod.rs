//! Configuration module for scrape runs
//!
//! Provides the `ScrapeConfig` struct, its type-safe builder and
//! environment loading with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod env;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithStoreUrl};
pub use types::{ConfigError, ScrapeConfig};
