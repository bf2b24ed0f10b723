//! Progress reporting for scrape runs
//!
//! The run orchestrator calls these hooks at category and record
//! boundaries. [`NoOpProgress`] ignores them; [`LogProgress`] forwards them
//! to `tracing`.

use tracing::info;

/// Lifecycle hooks for one scrape run
pub trait ProgressReporter: Send + Sync {
    /// A category listing is about to be collected
    fn report_category_started(&self, category: &str, index: usize, total: usize);

    /// Links were collected and partitioned for a category
    fn report_links_collected(&self, category: &str, collected: usize, new: usize);

    /// A detail page was scraped
    fn report_record_scraped(&self, url: &str);

    /// A detail page could not be scraped
    fn report_record_failed(&self, url: &str, error: &str);

    /// The run is finished
    fn report_completed(&self, scraped: usize);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_category_started(&self, _category: &str, _index: usize, _total: usize) {}

    #[inline(always)]
    fn report_links_collected(&self, _category: &str, _collected: usize, _new: usize) {}

    #[inline(always)]
    fn report_record_scraped(&self, _url: &str) {}

    #[inline(always)]
    fn report_record_failed(&self, _url: &str, _error: &str) {}

    #[inline(always)]
    fn report_completed(&self, _scraped: usize) {}
}

/// Progress reporter that logs each event at `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_category_started(&self, category: &str, index: usize, total: usize) {
        info!("[{}/{}] category {}", index + 1, total, category);
    }

    fn report_links_collected(&self, category: &str, collected: usize, new: usize) {
        info!("{}: {} links collected, {} new", category, collected, new);
    }

    fn report_record_scraped(&self, url: &str) {
        info!("scraped {}", url);
    }

    fn report_record_failed(&self, url: &str, error: &str) {
        info!("failed {}: {}", url, error);
    }

    fn report_completed(&self, scraped: usize) {
        info!("run complete: {} records scraped", scraped);
    }
}
