//! Shared configuration constants for the recipe scraper
//!
//! Default values used by the config builder and the scrape pipeline, kept in
//! one place to avoid magic numbers scattered across modules.

/// Site root for all category and detail pages
pub const BASE_URL: &str = "https://www.maff.go.jp";

/// Category listing pages, relative to [`BASE_URL`]
///
/// The last path segment (minus `.html`) becomes the record's category.
pub const CATEGORY_PATHS: &[&str] = &[
    "/j/keikaku/syokubunka/k_ryouri/search_menu/type/rice.html",
    "/j/keikaku/syokubunka/k_ryouri/search_menu/type/noodles.html",
    "/j/keikaku/syokubunka/k_ryouri/search_menu/type/soup.html",
    "/j/keikaku/syokubunka/k_ryouri/search_menu/type/meat_vegetable.html",
    "/j/keikaku/syokubunka/k_ryouri/search_menu/type/fish.html",
];

/// Detail links kept per category
pub const MAX_LINKS_PER_CATEGORY: usize = 5;

/// Consecutive zero-gain reloads after which collection gives up
pub const NO_NEW_LINK_ATTEMPTS: usize = 3;

/// Default reload ceiling for one category listing
pub const DEFAULT_REFRESH_MAX: usize = 20;

/// Wait after each listing reload so the randomized section can render
pub const DEFAULT_RELOAD_SETTLE_MS: u64 = 2000;

/// Pause after each successful detail fetch
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Timeout for a single detail-page HTTP request
pub const DETAIL_FETCH_TIMEOUT_SECS: u64 = 15;

/// Timeout for CDP requests issued to the browser
pub const BROWSER_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default store table
pub const DEFAULT_COLLECTION_NAME: &str = "recipes";

/// Default CSV backup file
pub const DEFAULT_BACKUP_FILE: &str = "maff_recipe_top5_each_category.csv";

/// Desktop Chrome user agent sent with detail-page requests and by the browser
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
