pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{category_from_url, default_category_urls, is_valid_url, resolve_url};
