//! End-to-end scrape run
//!
//! For each category: collect links, drop already-stored ones, scrape the
//! rest one by one. The accumulated records are then upserted in one batch
//! and written to the CSV backup once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::backup::write_backup;
use crate::browser::BrowserSession;
use crate::collector::{CollectLimits, ListingProvider, SessionListings, collect_links};
use crate::config::ScrapeConfig;
use crate::dedup::{ExistingKeys, partition_new_links};
use crate::extractor::{DetailFetcher, DetailSource, RecipeRecord};
use crate::progress::ProgressReporter;
use crate::store::{RecipeStore, UpsertSummary};
use crate::utils::category_from_url;

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Categories visited (fewer than configured on early stop)
    pub categories: usize,
    /// Links collected across all categories
    pub collected: usize,
    /// Links not yet in the store
    pub new: usize,
    /// Links already in the store
    pub existing: usize,
    /// Detail pages scraped successfully
    pub scraped: usize,
    /// Detail pages that failed
    pub failed: usize,
    pub upsert: UpsertSummary,
    /// Set when the backup file was written
    pub backup_path: Option<PathBuf>,
}

/// Records produced by the category loop plus its counters
#[derive(Debug, Clone, Default)]
pub struct CategoryHarvest {
    /// In first-seen order, one per detail URL
    pub records: Vec<RecipeRecord>,
    pub summary: RunSummary,
}

/// Category loop settings
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub limits: CollectLimits,
    /// Pause after each successful detail fetch
    pub request_delay: Duration,
}

impl HarvestOptions {
    #[must_use]
    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            limits: CollectLimits {
                max_links: config.max_links_per_category(),
                refresh_max: config.refresh_max(),
                ..CollectLimits::default()
            },
            request_delay: config.request_delay(),
        }
    }
}

/// Walk every category and scrape its new detail pages.
///
/// A URL seen again under a later category is not fetched twice; the
/// existing record is re-tagged with the later category. When no category
/// yields new data the loop ends without scraping anything.
pub async fn harvest_categories<L, K, D>(
    listings: &L,
    store: &K,
    details: &D,
    category_urls: &[String],
    options: &HarvestOptions,
    progress: &dyn ProgressReporter,
) -> CategoryHarvest
where
    L: ListingProvider,
    K: ExistingKeys,
    D: DetailSource,
{
    let mut harvest = CategoryHarvest::default();
    let mut by_url: HashMap<String, usize> = HashMap::new();
    let mut no_new_data = 0;
    let total = category_urls.len();

    for (index, listing_url) in category_urls.iter().enumerate() {
        let category = category_from_url(listing_url);
        harvest.summary.categories += 1;
        progress.report_category_started(&category, index, total);
        info!("Category {} ({})", category, listing_url);

        let links = match listings.open_listing(listing_url).await {
            Ok(mut listing) => {
                let collected = collect_links(&mut listing, options.limits).await;
                listings.close_listing(listing).await;
                collected.links
            }
            Err(e) => {
                warn!("Failed to open listing {}: {:#}", listing_url, e);
                Vec::new()
            }
        };

        let partition = partition_new_links(store, &links).await;
        harvest.summary.collected += links.len();
        harvest.summary.new += partition.new.len();
        harvest.summary.existing += partition.existing.len();
        progress.report_links_collected(&category, links.len(), partition.new.len());

        if partition.new.is_empty() {
            info!("{}: no new recipes", category);
            no_new_data += 1;
            if no_new_data == total {
                info!("No new data in any category, stopping");
                break;
            }
            continue;
        }

        for url in &partition.new {
            if let Some(&pos) = by_url.get(url) {
                info!("{} already scraped this run, re-tagging as {}", url, category);
                harvest.records[pos].category.clone_from(&category);
                continue;
            }

            match details.scrape(url).await {
                Ok(record) => {
                    by_url.insert(url.clone(), harvest.records.len());
                    harvest.records.push(record.with_category(category.as_str()));
                    harvest.summary.scraped += 1;
                    progress.report_record_scraped(url);
                    tokio::time::sleep(options.request_delay).await;
                }
                Err(e) => {
                    error!("Failed to scrape {}: {}", url, e);
                    harvest.summary.failed += 1;
                    progress.report_record_failed(url, &e.to_string());
                }
            }
        }
    }

    harvest
}

/// Run a full scrape with `config`.
///
/// Nothing past configuration is fatal. An unreachable store degrades to
/// "nothing stored yet" and skips the upsert; a browser that cannot launch
/// yields no links. Per-page, upsert and backup failures are logged and
/// reflected in the summary.
pub async fn run(config: &ScrapeConfig, progress: &dyn ProgressReporter) -> Result<RunSummary> {
    let store = match RecipeStore::open(config.store_url(), config.collection_name()).await {
        Ok(store) => Some(store),
        Err(e) => {
            error!(
                "Failed to open recipe store, continuing without it: {:#}",
                anyhow::Error::from(e)
            );
            None
        }
    };

    let result = harvest_and_persist(config, store.as_ref(), progress).await;
    if let Some(store) = &store {
        store.close().await;
    }
    result
}

async fn harvest_and_persist(
    config: &ScrapeConfig,
    store: Option<&RecipeStore>,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary> {
    let details = DetailFetcher::new(config.fetch_timeout())?;
    let options = HarvestOptions::from_config(config);

    let harvest = match BrowserSession::launch(
        config.headless(),
        config.chrome_executable().map(PathBuf::as_path),
    )
    .await
    {
        Ok(session) => {
            let harvest = {
                let listings = SessionListings::new(&session, config.reload_settle());
                harvest_categories(
                    &listings,
                    &store,
                    &details,
                    config.category_urls(),
                    &options,
                    progress,
                )
                .await
            };
            session.shutdown().await;
            harvest
        }
        Err(e) => {
            error!("Failed to launch browser, no links can be collected: {:#}", e);
            CategoryHarvest::default()
        }
    };

    let summary = persist_harvest(store, harvest, config.backup_path()).await;
    progress.report_completed(summary.scraped);
    Ok(summary)
}

/// Upsert the harvested records and write the backup.
///
/// An empty harvest touches neither. Without a store the whole batch is
/// counted as failed and the backup is still written.
pub async fn persist_harvest(
    store: Option<&RecipeStore>,
    harvest: CategoryHarvest,
    backup_path: &Path,
) -> RunSummary {
    let CategoryHarvest {
        records,
        mut summary,
    } = harvest;

    if records.is_empty() {
        info!("No new recipes collected");
        return summary;
    }

    summary.upsert = match store {
        Some(store) => store.upsert_batch(&records).await,
        None => {
            error!("No recipe store, skipping upsert of {} records", records.len());
            UpsertSummary {
                failed: records.len(),
                ..UpsertSummary::default()
            }
        }
    };

    let target = backup_path.to_path_buf();
    match tokio::task::spawn_blocking(move || write_backup(&target, &records)).await {
        Ok(Ok(())) => {
            info!("Backup written to {}", backup_path.display());
            summary.backup_path = Some(backup_path.to_path_buf());
        }
        Ok(Err(e)) => error!("Backup failed: {:#}", e),
        Err(e) => error!("Backup task panicked: {}", e),
    }

    if let Some(store) = store {
        match store.count().await {
            Ok(count) => info!("{} records in {}", count, store.table()),
            Err(e) => warn!("Failed to count stored records: {}", e),
        }
    }

    summary
}
