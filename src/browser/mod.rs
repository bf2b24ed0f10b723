//! Headless browser boundary
//!
//! Executable discovery, launch and the run-scoped session used by the
//! link collector.

mod session;
mod setup;

pub use session::BrowserSession;
pub use setup::{download_managed_browser, find_browser_executable, launch_browser};
