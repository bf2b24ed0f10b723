//! URL helpers for listing and detail pages.

use url::Url;

use super::constants::{BASE_URL, CATEGORY_PATHS};

/// Absolute URLs of the built-in category listing pages
#[must_use]
pub fn default_category_urls() -> Vec<String> {
    CATEGORY_PATHS
        .iter()
        .filter_map(|path| resolve_url(BASE_URL, path))
        .collect()
}

/// Resolve `href` against `base`, dropping any fragment.
///
/// Returns `None` for unparsable input and for non-http(s) results
/// (`javascript:`, `mailto:` and the like).
#[must_use]
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut resolved = Url::parse(base).ok()?.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved.into())
}

/// Category name derived from a listing URL: last path segment without `.html`
///
/// `https://www.maff.go.jp/.../type/rice.html` → `rice`
#[must_use]
pub fn category_from_url(listing_url: &str) -> String {
    let path = Url::parse(listing_url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| listing_url.to_string());

    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    segment.trim_end_matches(".html").to_string()
}

/// Check if a URL is valid
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
