use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{Resolution, ResolveError, Resolver};
use crate::config::HttpConfig;
use crate::download::http_client;

/// Resolves a candidate by requesting it and following redirects. The final
/// response is returned unread so the fetcher can stream it straight to disk.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    client: Client,
}

impl RedirectResolver {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(http)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resolver for RedirectResolver {
    async fn resolve(&self, candidate: &str) -> Result<Resolution, ResolveError> {
        let url = Url::parse(candidate.trim())
            .map_err(|_| ResolveError::Unrecognized(candidate.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ResolveError::Transport {
                url: candidate.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: response.url().to_string(),
                status,
            });
        }

        debug!("Resolved {} -> {}", candidate, response.url());
        Ok(Resolution::Fetched(response))
    }

    fn name(&self) -> &'static str {
        "redirect"
    }
}
