pub mod backup;
pub mod browser;
pub mod collector;
pub mod config;
pub mod dedup;
pub mod extractor;
pub mod progress;
pub mod runner;
pub mod store;
pub mod utils;

pub use backup::{BACKUP_HEADER, ingredients_to_string, write_backup, write_records};
pub use browser::{BrowserSession, download_managed_browser, find_browser_executable};
pub use collector::{
    BrowserListing, CollectLimits, CollectedLinks, ListingProvider, ListingSource,
    SessionListings, StopReason, collect_links,
};
pub use config::{ConfigError, ScrapeConfig};
pub use dedup::{ExistingKeys, LinkPartition, partition_new_links};
pub use extractor::{
    DetailFetcher, DetailSource, ExtractError, Ingredient, RecipeRecord, parse_detail_page,
};
pub use progress::{LogProgress, NoOpProgress, ProgressReporter};
pub use runner::{
    CategoryHarvest, HarvestOptions, RunSummary, harvest_categories, persist_harvest, run,
};
pub use store::{RecipeStore, StoreError, UpsertSummary};
