pub mod config;
pub mod download;
pub mod input;
pub mod resolver;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigManager};
pub use download::{
    BatchSummary, DownloadEngine, DownloadManager, DownloadOptions, DownloadProgress, FetchError,
    FetchOutcome, OutputTarget,
};
pub use input::read_candidates;
pub use resolver::{
    PatternResolver, RedirectResolver, Resolution, ResolveError, Resolver, Strategy,
};
