//! Error types for pixiv-dl
//!
//! This module provides the error taxonomy for the library:
//! - Session/configuration errors (fatal before any network activity)
//! - Transport errors (classified retryable by [`crate::retry::IsRetryable`])
//! - API envelope errors (the remote reported `error: true` or an empty body)
//! - Transcode errors with context (archive path, offending frame)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pixiv-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pixiv-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "cookie")
        key: Option<String>,
    },

    /// Network error (connect, timeout, or non-success HTTP status)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote API envelope reported an error or returned an empty body
    #[error("API error: {0}")]
    Api(String),

    /// A media URL did not contain a recognizable image path
    #[error("invalid media URL: {0}")]
    InvalidUrl(String),

    /// Frame archive to video transcoding error
    #[error("transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    /// External tool execution failed (ffmpeg)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary, not implemented, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Transcoding errors (frame archive extraction, frame validation, encoding)
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The frame archive could not be opened or read
    #[error("failed to read frame archive {}: {}", .archive.display(), .reason)]
    Archive {
        /// The archive file that failed to open
        archive: PathBuf,
        /// The reason the archive could not be read
        reason: String,
    },

    /// The frame archive contains no frames
    #[error("frame archive {} contains no frames", .archive.display())]
    EmptyArchive {
        /// The archive file that was empty
        archive: PathBuf,
    },

    /// A frame could not be decoded to determine its dimensions
    #[error("failed to decode frame {}: {}", .frame.display(), .reason)]
    FrameDecode {
        /// The frame file that failed to decode
        frame: PathBuf,
        /// The reason the frame could not be decoded
        reason: String,
    },

    /// A frame's dimensions differ from the first frame's dimensions
    ///
    /// Feeding mixed-size frames to the encoder would silently corrupt the
    /// output, so the mismatch fails loudly instead.
    #[error(
        "frame {} is {}x{}, expected {}x{} from the first frame",
        .frame.display(), .width, .height, .expected_width, .expected_height
    )]
    SizeMismatch {
        /// The frame whose dimensions differ
        frame: PathBuf,
        /// Width of the first frame
        expected_width: u32,
        /// Height of the first frame
        expected_height: u32,
        /// Width of the offending frame
        width: u32,
        /// Height of the offending frame
        height: u32,
    },
}
