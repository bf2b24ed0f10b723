//! Plain-HTTP detail page fetching

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use super::charset::{charset_from_content_type, decode_body};
use super::errors::ExtractError;
use super::extractors::parse_detail_page;
use super::schema::RecipeRecord;
use crate::utils::constants::{CHROME_USER_AGENT, DETAIL_FETCH_TIMEOUT_SECS};
use crate::utils::is_valid_url;

/// Anything that can turn a detail URL into a record
pub trait DetailSource {
    fn scrape(&self, url: &str) -> impl Future<Output = Result<RecipeRecord, ExtractError>> + Send;
}

/// HTTP client for detail pages
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct DetailFetcher {
    client: Client,
}

impl DetailFetcher {
    /// Client with the desktop Chrome user agent and the given request timeout
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| ExtractError::Request {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// GET `url` and return the decoded body
    ///
    /// The body charset comes from the `Content-Type` header, then a `<meta>`
    /// declaration, defaulting to UTF-8.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ExtractError> {
        if !is_valid_url(url) {
            return Err(ExtractError::InvalidUrl(url.to_string()));
        }

        info!("[GET] {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ExtractError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type);

        let bytes = response.bytes().await.map_err(|source| ExtractError::Request {
            url: url.to_string(),
            source,
        })?;
        let body = decode_body(&bytes, header_charset.as_deref());
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Fetch and parse one detail page. `category` is left for the caller.
    pub async fn scrape_detail_page(&self, url: &str) -> Result<RecipeRecord, ExtractError> {
        let html = self.fetch_html(url).await?;
        Ok(parse_detail_page(&html, url))
    }
}

impl Default for DetailFetcher {
    fn default() -> Self {
        match Self::new(Duration::from_secs(DETAIL_FETCH_TIMEOUT_SECS)) {
            Ok(fetcher) => fetcher,
            Err(e) => {
                warn!(
                    "Failed to build detail client ({}), falling back to a bare client \
                     without user agent or timeout",
                    e
                );
                Self::with_client(Client::new())
            }
        }
    }
}

impl DetailSource for DetailFetcher {
    fn scrape(&self, url: &str) -> impl Future<Output = Result<RecipeRecord, ExtractError>> + Send {
        self.scrape_detail_page(url)
    }
}
