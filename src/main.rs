// Scrape regional recipes from every category listing into the store and
// write the CSV backup.
//
// Configuration comes from the environment; see `ScrapeConfig::from_env`.

use anyhow::{Context, Result};
use recipe_scrape::{LogProgress, ScrapeConfig, run};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = ScrapeConfig::from_env().context("Invalid configuration")?;
    info!(
        "Scraping {} categories into {}",
        config.category_urls().len(),
        config.collection_name()
    );

    let summary = run(&config, &LogProgress).await?;

    info!(
        "Done: {} collected, {} new, {} existing, {} scraped, {} failed",
        summary.collected, summary.new, summary.existing, summary.scraped, summary.failed
    );
    info!(
        "Store: {} inserted, {} modified, {} failed",
        summary.upsert.inserted, summary.upsert.modified, summary.upsert.failed
    );
    if let Some(path) = &summary.backup_path {
        info!("Backup: {}", path.display());
    }
    Ok(())
}
