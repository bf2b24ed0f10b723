//! Browser-backed category listing

use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::page::Page;
use tracing::debug;

use super::{ListingProvider, ListingSource};
use crate::browser::BrowserSession;
use crate::utils::resolve_url;

/// The active listing section; its numeric id suffix changes between loads
pub const LISTING_SECTION_SELECTOR: &str = "div[id^='SearchMenu']";

/// Recipe card links inside a listing section
pub const LISTING_CARD_LINK_SELECTOR: &str = "div.list p.tit a[href]";

/// A category listing page driven through a live browser tab
pub struct BrowserListing {
    page: Page,
    listing_url: String,
    settle: Duration,
}

impl BrowserListing {
    /// `settle` is waited after every navigation so client-side rendering can finish
    pub fn new(page: Page, listing_url: impl Into<String>, settle: Duration) -> Self {
        Self {
            page,
            listing_url: listing_url.into(),
            settle,
        }
    }

    #[must_use]
    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    /// Close the underlying tab
    pub async fn close(self) {
        if let Err(e) = self.page.close().await {
            debug!("Failed to close listing page: {}", e);
        }
    }

    async fn reload(&self) -> Result<Option<Vec<String>>> {
        self.page
            .goto(self.listing_url.as_str())
            .await
            .with_context(|| format!("Failed to navigate to {}", self.listing_url))?;
        tokio::time::sleep(self.settle).await;

        // A failed query is treated the same as an absent section
        let sections = match self.page.find_elements(LISTING_SECTION_SELECTOR).await {
            Ok(sections) => sections,
            Err(e) => {
                debug!("Section query failed: {}", e);
                return Ok(None);
            }
        };
        let Some(section) = sections.first() else {
            return Ok(None);
        };
        let Some(section_id) = section
            .attribute("id")
            .await
            .context("Failed to read listing section id")?
        else {
            return Ok(None);
        };
        debug!("Active listing section: {}", section_id);

        let card_selector = format!("div[id='{section_id}'] {LISTING_CARD_LINK_SELECTOR}");
        let cards = self
            .page
            .find_elements(card_selector.as_str())
            .await
            .with_context(|| format!("Card query failed in section {section_id}"))?;

        let mut links = Vec::with_capacity(cards.len());
        for card in cards {
            if let Ok(Some(href)) = card.attribute("href").await
                && let Some(url) = resolve_url(&self.listing_url, &href)
            {
                links.push(url);
            }
        }
        Ok(Some(links))
    }
}

impl ListingSource for BrowserListing {
    fn load_links(
        &mut self,
    ) -> impl std::future::Future<Output = Result<Option<Vec<String>>>> + Send {
        self.reload()
    }
}

/// A browser session paired with the settle wait used for every listing it opens
pub struct SessionListings<'a> {
    session: &'a BrowserSession,
    settle: Duration,
}

impl<'a> SessionListings<'a> {
    pub fn new(session: &'a BrowserSession, settle: Duration) -> Self {
        Self { session, settle }
    }
}

impl ListingProvider for SessionListings<'_> {
    type Listing = BrowserListing;

    async fn open_listing(&self, listing_url: &str) -> Result<BrowserListing> {
        let page = self.session.new_page().await?;
        Ok(BrowserListing::new(page, listing_url, self.settle))
    }

    async fn close_listing(&self, listing: BrowserListing) {
        listing.close().await;
    }
}
