//! Recipe record types shared by the extractor, the store and the backup writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingredient line: name plus free-text amount (`450g（3合）`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }
}

/// A scraped recipe, keyed by `detail_url`
///
/// Every field except `created_at` is overwritten when the same URL is
/// scraped again. `scrape_count` and `created_at` are maintained by the
/// store and stay `None` on freshly extracted records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    pub main_image: String,
    pub main_ingredients: String,
    pub eating_method: String,
    pub cooking_method: String,
    pub ingredients: Vec<Ingredient>,
    #[serde(rename = "detailUrl")]
    pub detail_url: String,
    pub category: String,
    #[serde(rename = "scrapeCount", default, skip_serializing_if = "Option::is_none")]
    pub scrape_count: Option<i64>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RecipeRecord {
    /// Empty record for `detail_url`; sections are filled in by the extractor
    #[must_use]
    pub fn new(detail_url: impl Into<String>) -> Self {
        Self {
            detail_url: detail_url.into(),
            ..Self::default()
        }
    }

    /// Builder-style category setter
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
