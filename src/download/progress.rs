use std::path::PathBuf;
use std::time::Duration;

/// Per-candidate events emitted by the batch run.
#[derive(Debug, Clone)]
pub enum DownloadProgress {
    Started {
        index: usize,
        total: usize,
        candidate: String,
    },
    Unresolved {
        index: usize,
        candidate: String,
        error: String,
    },
    Downloaded {
        index: usize,
        path: PathBuf,
        bytes: u64,
    },
    Skipped {
        index: usize,
        path: PathBuf,
    },
    Failed {
        index: usize,
        url: String,
        error: String,
    },
    CapReached {
        max_downloads: usize,
        remaining: usize,
    },
}

pub struct ProgressTracker;

impl ProgressTracker {
    pub fn format_bytes(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(ProgressTracker::format_bytes(0), "0 B");
        assert_eq!(ProgressTracker::format_bytes(512), "512 B");
        assert_eq!(ProgressTracker::format_bytes(1536), "1.5 KB");
        assert_eq!(ProgressTracker::format_bytes(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(ProgressTracker::format_duration(Duration::from_secs(7)), "7s");
        assert_eq!(ProgressTracker::format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(
            ProgressTracker::format_duration(Duration::from_secs(3 * 3600 + 61)),
            "3h 1m 1s"
        );
    }
}
