//! Configuration types for pixiv-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for [`crate::PixivDownloader`]
///
/// All fields except `user_id` and `cookie` carry sensible defaults, so a
/// minimal configuration is:
///
/// ```
/// use pixiv_dl::Config;
///
/// let config = Config {
///     user_id: "12345678".to_string(),
///     cookie: "PHPSESSID=...".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Pixiv user id of the account whose following list is crawled
    pub user_id: String,

    /// Resolved session cookie string (see [`resolve_cookie`])
    pub cookie: String,

    /// Directory downloaded media is written to (default: "./downloads")
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// Proxy URL applied to every request (e.g. "http://localhost:1080"; None = direct)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Number of concurrent workers for discovery and download phases (default: 8)
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Page size for the following-list pagination (default: 24)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Base URL of the Pixiv AJAX API (default: "https://www.pixiv.net")
    ///
    /// Overridable so tests can point the session at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Retry policy for media fetches
    #[serde(default)]
    pub retry: RetryConfig,

    /// Video assembly settings (ugoira frame archives)
    #[serde(default)]
    pub video: VideoConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            cookie: String::new(),
            save_dir: default_save_dir(),
            proxy: None,
            worker_count: default_worker_count(),
            page_size: default_page_size(),
            api_base: default_api_base(),
            retry: RetryConfig::default(),
            video: VideoConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning the first fatal problem found
    ///
    /// Called by [`crate::PixivDownloader::new`] before any network activity.
    pub fn validate(&self) -> Result<()> {
        if self.cookie.trim().is_empty() {
            return Err(Error::Config {
                message: "a session cookie is required to crawl".to_string(),
                key: Some("cookie".to_string()),
            });
        }
        if self.user_id.trim().is_empty() {
            return Err(Error::Config {
                message: "the crawling account's user id is required".to_string(),
                key: Some("user_id".to_string()),
            });
        }
        if self.worker_count == 0 {
            return Err(Error::Config {
                message: "worker_count must be at least 1".to_string(),
                key: Some("worker_count".to_string()),
            });
        }
        if self.page_size == 0 {
            return Err(Error::Config {
                message: "page_size must be at least 1".to_string(),
                key: Some("page_size".to_string()),
            });
        }
        Ok(())
    }
}

/// Retry configuration for transient fetch failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first failure (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 60 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Video assembly configuration for ugoira frame archives
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Frame rate of assembled videos (default: 15)
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Path to the ffmpeg executable (auto-detected if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for ffmpeg if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            ffmpeg_path: None,
            search_path: true,
        }
    }
}

/// Resolve a cookie source that is either a file path or the literal cookie
///
/// If `source` names an existing file, its trimmed contents are returned;
/// otherwise `source` itself is treated as the cookie string.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> pixiv_dl::Result<()> {
/// let cookie = pixiv_dl::config::resolve_cookie("~/.config/pixiv/cookie.txt").await?;
/// # Ok(())
/// # }
/// ```
pub async fn resolve_cookie(source: &str) -> Result<String> {
    let path = Path::new(source);
    if path.is_file() {
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(contents.trim().to_string())
    } else {
        Ok(source.to_string())
    }
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_worker_count() -> usize {
    8
}

fn default_page_size() -> usize {
    24
}

fn default_api_base() -> String {
    "https://www.pixiv.net".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(60)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_fps() -> u32 {
    15
}

fn default_true() -> bool {
    true
}

/// Serde support for Duration as milliseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = Config::default();
        assert_eq!(config.save_dir, PathBuf::from("./downloads"));
        assert_eq!(config.worker_count, 8);
        assert_eq!(config.page_size, 24);
        assert_eq!(config.api_base, "https://www.pixiv.net");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.video.fps, 15);
        assert!(config.video.search_path);
    }

    #[test]
    fn validate_rejects_missing_cookie() {
        let config = Config {
            user_id: "123".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            crate::Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("cookie")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let config = Config {
            user_id: "123".to_string(),
            cookie: "PHPSESSID=abc".to_string(),
            worker_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_minimal_config() {
        let config = Config {
            user_id: "123".to_string(),
            cookie: "PHPSESSID=abc".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn retry_config_roundtrips_through_json() {
        let retry = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 1.5,
            jitter: false,
        };
        let json = serde_json::to_string(&retry).unwrap();
        let parsed: RetryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.max_attempts, 3);
        assert_eq!(parsed.initial_delay, Duration::from_millis(250));
        assert!(!parsed.jitter);
    }

    #[tokio::test]
    async fn resolve_cookie_reads_file_when_path_exists() {
        let dir = tempfile::TempDir::new().unwrap();
        let cookie_file = dir.path().join("cookie.txt");
        std::fs::write(&cookie_file, "PHPSESSID=from-file\n").unwrap();

        let cookie = resolve_cookie(cookie_file.to_str().unwrap()).await.unwrap();
        assert_eq!(cookie, "PHPSESSID=from-file");
    }

    #[tokio::test]
    async fn resolve_cookie_passes_literal_through() {
        let cookie = resolve_cookie("PHPSESSID=literal").await.unwrap();
        assert_eq!(cookie, "PHPSESSID=literal");
    }
}
