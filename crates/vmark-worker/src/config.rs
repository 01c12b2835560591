//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Work directory for per-job temporary files
    pub work_dir: PathBuf,
    /// Path to the watermark image asset
    pub watermark_path: PathBuf,
    /// How long presigned result URLs stay valid
    pub url_expiry: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/tmp/vmark"),
            watermark_path: PathBuf::from(vmark_media::DEFAULT_WATERMARK_PATH),
            url_expiry: Duration::from_secs(3600),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_dir: std::env::var("VMARK_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            watermark_path: std::env::var("VMARK_WATERMARK_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.watermark_path),
            url_expiry: Duration::from_secs(
                std::env::var("VMARK_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.work_dir, PathBuf::from("/tmp/vmark"));
        assert_eq!(config.url_expiry, Duration::from_secs(3600));
    }
}
