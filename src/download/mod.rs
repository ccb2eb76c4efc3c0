pub mod engine;
pub mod manager;
pub mod progress;
pub mod target;

pub use engine::{DownloadEngine, FetchError, FetchOutcome};
pub use manager::{BatchSummary, DownloadManager, DownloadOptions};
pub use progress::{DownloadProgress, ProgressTracker};
pub use target::{OutputTarget, is_downloaded, output_file_name};

use anyhow::{Context, Result};
use reqwest::{Client, redirect};
use std::time::Duration;

use crate::config::HttpConfig;

/// HTTP client shared by the resolvers and the fetcher.
pub fn http_client(http: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .user_agent(http.user_agent.as_str())
        .redirect(redirect::Policy::limited(http.max_redirects))
        .build()
        .context("Failed to create HTTP client")
}
