use anyhow::Result;
use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::{OutputTarget, http_client};
use crate::config::HttpConfig;
use crate::resolver::Resolution;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not determine file name from {0:?}")]
    NoFileName(String),

    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to download {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download failed for {url}: {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to save PDF to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// A new file was written
    Downloaded { path: PathBuf, bytes: u64 },
    /// The target already existed; nothing was requested or written
    Skipped { path: PathBuf },
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn is_downloaded(&self) -> bool {
        matches!(self, FetchOutcome::Downloaded { .. })
    }
}

/// Writes resolved documents to disk.
///
/// Failures never escape [`DownloadEngine::fetch`]: they are logged and
/// handed back as [`FetchOutcome::Failed`]. Bodies are streamed into a
/// temporary file next to the target and only renamed into place once the
/// whole body has arrived, so an interrupted transfer leaves nothing behind
/// that a later run would mistake for a finished download.
#[derive(Debug, Clone)]
pub struct DownloadEngine {
    client: Client,
}

impl DownloadEngine {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(http)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, resolution: Resolution, output_dir: &Path) -> FetchOutcome {
        match self.try_fetch(resolution, output_dir).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("{}", e);
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn try_fetch(
        &self,
        resolution: Resolution,
        output_dir: &Path,
    ) -> Result<FetchOutcome, FetchError> {
        let target = OutputTarget::for_url(resolution.url(), output_dir)?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| FetchError::CreateDir {
                path: output_dir.to_path_buf(),
                source,
            })?;

        if target.exists() {
            debug!("File already exists, skipping: {}", target.path.display());
            return Ok(FetchOutcome::Skipped { path: target.path });
        }

        let response = match resolution {
            Resolution::Located(url) => {
                debug!("Requesting {}", url);
                self.client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|source| FetchError::Transport { url, source })?
            }
            Resolution::Fetched(response) => response,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: response.url().to_string(),
                status,
            });
        }

        let bytes = Self::write_body(response, &target.path, output_dir).await?;

        debug!("Downloaded to {} ({} bytes)", target.path.display(), bytes);
        Ok(FetchOutcome::Downloaded {
            path: target.path,
            bytes,
        })
    }

    async fn write_body(
        response: Response,
        path: &Path,
        output_dir: &Path,
    ) -> Result<u64, FetchError> {
        let write_err = |source| FetchError::Write {
            path: path.to_path_buf(),
            source,
        };

        let url = response.url().to_string();

        // Removed on drop unless persisted
        let mut part = tempfile::Builder::new()
            .prefix(".dcfetch-")
            .suffix(".part")
            .tempfile_in(output_dir)
            .map_err(write_err)?;

        // A body cut short of its Content-Length surfaces as a chunk error
        let mut received = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
            part.write_all(&chunk).map_err(write_err)?;
            received += chunk.len() as u64;
        }

        part.flush().map_err(write_err)?;

        part.persist(path).map_err(|e| write_err(e.error))?;
        Ok(received)
    }
}

impl Default for DownloadEngine {
    fn default() -> Self {
        Self::new(&HttpConfig::default()).expect("Failed to create default DownloadEngine")
    }
}
