pub mod pattern;
pub mod redirect;

pub use pattern::PatternResolver;
pub use redirect::RedirectResolver;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::Config;

/// Where a candidate ended up after resolution.
#[derive(Debug)]
pub enum Resolution {
    /// Final location computed without touching the network.
    Located(String),
    /// The request was already issued; the body has not been read yet.
    Fetched(Response),
}

impl Resolution {
    /// The final URL as text, regardless of how it was obtained.
    pub fn url(&self) -> &str {
        match self {
            Resolution::Located(url) => url,
            Resolution::Fetched(response) => response.url().as_str(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid or unrecognized DocumentCloud URL: {0}")]
    Unrecognized(String),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
}

/// Turns a document reference into something the fetcher can write to disk.
#[async_trait]
pub trait Resolver: Send + Sync + fmt::Debug {
    async fn resolve(&self, candidate: &str) -> Result<Resolution, ResolveError>;

    /// Short name used in logs and summaries
    fn name(&self) -> &'static str;
}

/// Resolver for the configured strategy, sharing `client` for any requests.
pub fn build_resolver(config: &Config, client: Client) -> anyhow::Result<Box<dyn Resolver>> {
    let resolver: Box<dyn Resolver> = match config.general.strategy {
        Strategy::Pattern => Box::new(
            PatternResolver::from_config(&config.storage)
                .context("Failed to build document pattern")?,
        ),
        Strategy::Redirect => Box::new(RedirectResolver::with_client(client)),
    };
    Ok(resolver)
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Rewrite the URL text into the storage URL
    #[default]
    Pattern,
    /// Follow HTTP redirects to the storage URL
    Redirect,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Pattern => write!(f, "pattern"),
            Strategy::Redirect => write!(f, "redirect"),
        }
    }
}
