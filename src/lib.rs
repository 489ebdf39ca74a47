//! # pixiv-dl
//!
//! Crawler and downloader library for Pixiv artworks and ugoira animations.
//!
//! ## Design Philosophy
//!
//! pixiv-dl is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Idempotent** - Re-running a crawl skips everything already on disk
//! - **Isolated failures** - One dead URL never aborts the rest of a run
//! - **Sensible defaults** - A cookie and a user id are enough to start
//!
//! ## Quick Start
//!
//! ```no_run
//! use pixiv_dl::{Config, DownloadOptions, PixivDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cookie = pixiv_dl::config::resolve_cookie("cookie.txt").await?;
//!     let config = Config {
//!         user_id: "12345678".to_string(),
//!         cookie,
//!         ..Default::default()
//!     };
//!
//!     let downloader = PixivDownloader::new(config)?;
//!
//!     // Mirror every followed artist, assembling animations into videos
//!     for artist in downloader.list_followed_artists().await? {
//!         let stats = downloader
//!             .download_artist(&artist, &DownloadOptions::assembling())
//!             .await?;
//!         println!("{artist}: {stats:?}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Pixiv AJAX API response models
pub mod api;
/// Shared HTTP session
pub mod client;
/// Configuration types
pub mod config;
/// Core crawler/downloader session (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Media URL to file name derivation
pub mod filename;
/// Retry logic with exponential backoff
pub mod retry;
/// Frame archive to video transcoding
pub mod transcode;
/// Core types and outcomes
pub mod types;
/// Fixed-size worker pool with static partitioning
pub mod worker_pool;

// Re-export commonly used types
pub use client::HttpClient;
pub use config::{Config, RetryConfig, VideoConfig, resolve_cookie};
pub use downloader::PixivDownloader;
pub use error::{Error, Result, TranscodeError};
pub use transcode::{FfmpegEncoder, FrameEncoder};
pub use types::{ArtistId, DownloadOptions, DownloadOutcome, DownloadStats};
pub use worker_pool::run_partitioned;
