//! Category link collection
//!
//! A category listing shows a randomized subset of recipes on every load.
//! The collector reloads it until enough distinct detail links have been
//! seen, nothing new turns up for a few loads in a row, or the reload
//! ceiling is hit.

mod listing;

pub use listing::{
    BrowserListing, LISTING_CARD_LINK_SELECTOR, LISTING_SECTION_SELECTOR, SessionListings,
};

use std::collections::HashSet;
use std::future::Future;

use tracing::{info, warn};

use crate::utils::constants::{DEFAULT_REFRESH_MAX, MAX_LINKS_PER_CATEGORY, NO_NEW_LINK_ATTEMPTS};

/// One reloadable listing page
pub trait ListingSource {
    /// Reload the listing and return the detail links of its active section.
    ///
    /// `Ok(None)` means the section was absent on this load.
    fn load_links(&mut self) -> impl Future<Output = anyhow::Result<Option<Vec<String>>>> + Send;
}

/// Opens listing pages, one per category
pub trait ListingProvider {
    type Listing: ListingSource + Send;

    fn open_listing(
        &self,
        listing_url: &str,
    ) -> impl Future<Output = anyhow::Result<Self::Listing>> + Send;

    /// Release a listing once its category is done
    fn close_listing(&self, listing: Self::Listing) -> impl Future<Output = ()> + Send;
}

/// Bounds for one collection loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectLimits {
    /// Stop once this many distinct links are held
    pub max_links: usize,
    /// Maximum number of reloads
    pub refresh_max: usize,
    /// Stop after this many consecutive reloads without a new link
    pub max_idle_loads: usize,
}

impl Default for CollectLimits {
    fn default() -> Self {
        Self {
            max_links: MAX_LINKS_PER_CATEGORY,
            refresh_max: DEFAULT_REFRESH_MAX,
            max_idle_loads: NO_NEW_LINK_ATTEMPTS,
        }
    }
}

/// Why a collection loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enough distinct links were collected
    Saturated,
    /// `max_idle_loads` consecutive reloads added nothing
    NoNewLinks,
    /// The reload ceiling was reached
    RefreshLimit,
    /// The listing section was missing on a load
    SectionMissing,
    /// Loading the listing failed
    LoadFailed,
}

/// Outcome of [`collect_links`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedLinks {
    /// Distinct links in discovery order, at most `max_links`
    pub links: Vec<String>,
    /// Number of reloads performed
    pub loads: usize,
    pub stop: StopReason,
}

/// Reload `source` until saturation, idleness or the reload ceiling.
///
/// Never fails: a missing section or a load error ends the loop early and
/// whatever was accumulated is returned.
pub async fn collect_links<S: ListingSource>(
    source: &mut S,
    limits: CollectLimits,
) -> CollectedLinks {
    let mut links: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut idle_loads = 0;
    let mut loads = 0;
    let mut stop = StopReason::RefreshLimit;

    for attempt in 1..=limits.refresh_max {
        loads = attempt;

        let found = match source.load_links().await {
            Ok(Some(found)) => found,
            Ok(None) => {
                warn!("Listing section not found on load {}", attempt);
                stop = StopReason::SectionMissing;
                break;
            }
            Err(e) => {
                warn!("Listing load {} failed: {:#}", attempt, e);
                stop = StopReason::LoadFailed;
                break;
            }
        };

        let before = links.len();
        for link in found {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
        let added = links.len() - before;
        info!("Reload {}: +{} links ({} total)", attempt, added, links.len());

        if added == 0 {
            idle_loads += 1;
        } else {
            idle_loads = 0;
        }

        if idle_loads >= limits.max_idle_loads {
            info!("No new links for {} reloads, stopping", idle_loads);
            stop = StopReason::NoNewLinks;
            break;
        }

        if links.len() >= limits.max_links {
            info!("Collected {} links, stopping", links.len());
            stop = StopReason::Saturated;
            break;
        }
    }

    links.truncate(limits.max_links);
    info!("Selected {} links after {} reloads", links.len(), loads);

    CollectedLinks { links, loads, stop }
}
