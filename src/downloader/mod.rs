//! Core crawler/downloader session split into focused submodules.
//!
//! The `PixivDownloader` struct and its methods are organized by phase:
//! - [`enumerate`] - Followed-artist enumeration (paginated)
//! - [`discovery`] - Media link discovery for one artist
//! - [`download`] - Per-URL download and batch artist download

mod discovery;
mod download;
mod enumerate;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::client::HttpClient;
use crate::config::Config;
use crate::error::Result;
use crate::transcode::{FfmpegEncoder, FrameEncoder};
use std::sync::Arc;

/// Main crawler/downloader session (cloneable - all fields are Arc-wrapped)
///
/// Holds the credential, headers, and proxy as read-only shared state for
/// the session's lifetime. Construction validates the configuration before
/// any network activity; a missing credential is fatal here, not later.
#[derive(Clone)]
pub struct PixivDownloader {
    /// Configuration (wrapped in Arc for sharing across workers)
    pub(crate) config: Arc<Config>,
    /// Shared HTTP session carrying credential, headers, and proxy
    pub(crate) client: HttpClient,
    /// Frame encoder for ugoira video assembly; None when no encoder is available
    pub(crate) encoder: Option<Arc<dyn FrameEncoder>>,
}

impl PixivDownloader {
    /// Create a new session
    ///
    /// Validates the configuration (fatal on a missing credential), builds
    /// the shared HTTP client, and discovers an ffmpeg binary for video
    /// assembly. A missing encoder is not fatal: downloads still work, but
    /// requesting video assembly for a frame archive will fail with
    /// [`crate::Error::NotSupported`].
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(&config)?;

        let encoder: Option<Arc<dyn FrameEncoder>> = match FfmpegEncoder::resolve(&config.video) {
            Ok(encoder) => Some(Arc::new(encoder)),
            Err(e) => {
                tracing::warn!(error = %e, "no frame encoder available, video assembly disabled");
                None
            }
        };

        Ok(Self {
            config: Arc::new(config),
            client,
            encoder,
        })
    }

    /// Create a session with a caller-supplied frame encoder
    ///
    /// Used to plug in a custom encoder implementation (or a test double)
    /// instead of the auto-discovered ffmpeg binary.
    pub fn with_encoder(config: Config, encoder: Arc<dyn FrameEncoder>) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            encoder: Some(encoder),
        })
    }

    /// The session's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
