//! Deduplication of candidate links against stored keys

use std::collections::HashSet;
use std::future::Future;

use tracing::warn;

/// Anything that can report which of a set of detail URLs are already stored
pub trait ExistingKeys {
    /// Subset of `urls` already present in the store
    fn existing_urls(
        &self,
        urls: &[String],
    ) -> impl Future<Output = anyhow::Result<HashSet<String>>> + Send;
}

/// A missing store knows no keys
impl<K: ExistingKeys + Sync> ExistingKeys for Option<&K> {
    async fn existing_urls(&self, urls: &[String]) -> anyhow::Result<HashSet<String>> {
        match self {
            Some(keys) => keys.existing_urls(urls).await,
            None => Ok(HashSet::new()),
        }
    }
}

/// Candidates split into new and already-stored links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPartition {
    /// Not yet stored, in candidate order
    pub new: Vec<String>,
    /// Already stored
    pub existing: HashSet<String>,
}

/// Split `candidates` into new and existing links.
///
/// A failing store lookup is logged and every candidate is treated as new,
/// so the run proceeds at the cost of possibly re-scraping known pages.
pub async fn partition_new_links<K: ExistingKeys>(
    store: &K,
    candidates: &[String],
) -> LinkPartition {
    if candidates.is_empty() {
        return LinkPartition::default();
    }

    let existing = match store.existing_urls(candidates).await {
        Ok(found) => candidates
            .iter()
            .filter(|url| found.contains(*url))
            .cloned()
            .collect::<HashSet<_>>(),
        Err(e) => {
            warn!("Existing-record check failed, treating all links as new: {:#}", e);
            HashSet::new()
        }
    };

    let new = candidates
        .iter()
        .filter(|url| !existing.contains(*url))
        .cloned()
        .collect();

    LinkPartition { new, existing }
}
