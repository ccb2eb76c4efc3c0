use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::{DownloadEngine, DownloadProgress, FetchOutcome, http_client};
use crate::config::Config;
use crate::resolver::{ResolveError, Resolver, build_resolver};

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_directory: PathBuf,
    /// New files to write before the run stops
    pub max_downloads: usize,
}

impl DownloadOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_directory: config.general.output_dir.clone(),
            max_downloads: config.general.max_downloads,
        }
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub unresolved: usize,
    pub failed: usize,
    pub bytes_downloaded: u64,
    /// The cap stopped the run with candidates left over
    pub cap_reached: bool,
}

/// Runs a candidate list through a resolver and the download engine, one
/// item at a time, until the list is exhausted or the cap is hit.
pub struct DownloadManager {
    resolver: Box<dyn Resolver>,
    engine: DownloadEngine,
    options: DownloadOptions,
    progress_sender: mpsc::UnboundedSender<DownloadProgress>,
}

impl DownloadManager {
    pub fn new(
        resolver: Box<dyn Resolver>,
        engine: DownloadEngine,
        options: DownloadOptions,
    ) -> (Self, mpsc::UnboundedReceiver<DownloadProgress>) {
        let (progress_sender, progress_receiver) = mpsc::unbounded_channel();

        (
            Self {
                resolver,
                engine,
                options,
                progress_sender,
            },
            progress_receiver,
        )
    }

    pub fn from_config(
        config: &Config,
    ) -> Result<(Self, mpsc::UnboundedReceiver<DownloadProgress>)> {
        let client = http_client(&config.http)?;
        let resolver = build_resolver(config, client.clone())?;
        let engine = DownloadEngine::with_client(client);

        Ok(Self::new(
            resolver,
            engine,
            DownloadOptions::from_config(config),
        ))
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    pub async fn run<S: AsRef<str>>(&self, candidates: &[S]) -> BatchSummary {
        let total = candidates.len();
        let max_downloads = self.options.max_downloads;
        let mut summary = BatchSummary::default();

        for (index, candidate) in candidates.iter().enumerate() {
            let candidate = candidate.as_ref();

            if summary.downloaded >= max_downloads {
                info!(
                    "Reached maximum download limit of {}. Stopping.",
                    max_downloads
                );
                summary.cap_reached = true;
                self.emit(DownloadProgress::CapReached {
                    max_downloads,
                    remaining: total - index,
                });
                break;
            }

            summary.processed += 1;
            self.emit(DownloadProgress::Started {
                index,
                total,
                candidate: candidate.to_string(),
            });

            let resolution = match self.resolver.resolve(candidate).await {
                Ok(resolution) => resolution,
                Err(e @ ResolveError::Unrecognized(_)) => {
                    warn!("{}", e);
                    summary.unresolved += 1;
                    self.emit(DownloadProgress::Unresolved {
                        index,
                        candidate: candidate.to_string(),
                        error: e.to_string(),
                    });
                    continue;
                }
                Err(e) => {
                    warn!("{}", e);
                    summary.failed += 1;
                    self.emit(DownloadProgress::Failed {
                        index,
                        url: candidate.to_string(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let url = resolution.url().to_string();
            match self
                .engine
                .fetch(resolution, &self.options.output_directory)
                .await
            {
                FetchOutcome::Downloaded { path, bytes } => {
                    summary.downloaded += 1;
                    summary.bytes_downloaded += bytes;
                    self.emit(DownloadProgress::Downloaded { index, path, bytes });
                }
                FetchOutcome::Skipped { path } => {
                    summary.skipped += 1;
                    self.emit(DownloadProgress::Skipped { index, path });
                }
                FetchOutcome::Failed(e) => {
                    summary.failed += 1;
                    self.emit(DownloadProgress::Failed {
                        index,
                        url,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Run finished: {} downloaded, {} skipped, {} unresolved, {} failed",
            summary.downloaded, summary.skipped, summary.unresolved, summary.failed
        );
        summary
    }

    fn emit(&self, event: DownloadProgress) {
        // Nobody listening is fine
        let _ = self.progress_sender.send(event);
    }
}
