//! Run-scoped browser session
//!
//! One browser is launched per scrape run and closed when the run ends.

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::setup::launch_browser;

/// Browser plus its CDP handler task and temporary profile directory
///
/// Call [`BrowserSession::shutdown`] when done. Dropping without it aborts the
/// handler and removes the profile directory, but cannot wait for the
/// browser process to exit.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Launch a browser for this run
    pub async fn launch(headless: bool, executable: Option<&Path>) -> Result<Self> {
        let (browser, handler, user_data_dir) = launch_browser(headless, executable).await?;
        Ok(Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        })
    }

    /// Open a blank tab
    pub async fn new_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")
    }

    /// Close the browser, wait for the process to exit and remove the profile
    pub async fn shutdown(mut self) {
        info!("Shutting down browser session");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.cleanup_temp_dir();
    }

    /// Remove the profile directory. Must run after the browser has exited.
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Cleaning up temp directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();

        if self.user_data_dir.is_some() {
            warn!("BrowserSession dropped without shutdown - removing temp dir in Drop");
            self.cleanup_temp_dir();
        }
    }
}
