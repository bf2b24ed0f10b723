//! Error types for detail-page extraction
//!
//! Only transport-level failures are errors. Missing markup is reported as
//! empty fields by the extractors.

/// Failure to obtain a detail page
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The URL could not be parsed as absolute http(s)
    #[error("invalid detail URL: {0}")]
    InvalidUrl(String),

    /// Connection, timeout or body decoding failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}
