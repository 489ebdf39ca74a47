//! Core types for pixiv-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifier of a creator account
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(pub String);

impl ArtistId {
    /// Create a new ArtistId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ArtistId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ArtistId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ArtistId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ArtistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of one URL's download attempt
///
/// A tri-state outcome, not an error: a `Failed` download never aborts
/// sibling workers or the overall run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// The media was fetched and written (or assembled into a video)
    Done,
    /// A file already exists at the target path (or its video form); nothing was fetched
    AlreadyExists,
    /// The fetch kept failing until the retry budget ran out; nothing was written
    Failed,
}

/// Per-call download options
///
/// The save directory override is an explicit parameter so concurrent callers
/// never mutate shared session state.
#[derive(Clone, Debug, Default)]
pub struct DownloadOptions {
    /// Assemble ugoira frame archives into a video instead of keeping the archive
    pub assemble_video: bool,

    /// Save directory for this call only (None = the session's configured directory)
    pub save_dir: Option<PathBuf>,
}

impl DownloadOptions {
    /// Options for a full artist mirror: frame archives are assembled into videos
    pub fn assembling() -> Self {
        Self {
            assemble_video: true,
            save_dir: None,
        }
    }
}

/// Aggregated outcome counts for a batch download
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStats {
    /// URLs fetched and written
    pub done: usize,
    /// URLs skipped because their target file already existed
    pub already_exists: usize,
    /// URLs whose retry budget ran out
    pub failed: usize,
}

impl DownloadStats {
    /// Record one download outcome
    pub fn record(&mut self, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::Done => self.done += 1,
            DownloadOutcome::AlreadyExists => self.already_exists += 1,
            DownloadOutcome::Failed => self.failed += 1,
        }
    }

    /// Total number of outcomes recorded
    pub fn total(&self) -> usize {
        self.done + self.already_exists + self.failed
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_id_display_and_from() {
        let id = ArtistId::from(11);
        assert_eq!(id.to_string(), "11");
        assert_eq!(ArtistId::from("11"), id);
        assert_eq!(id.as_str(), "11");
    }

    #[test]
    fn stats_record_all_outcomes() {
        let mut stats = DownloadStats::default();
        stats.record(DownloadOutcome::Done);
        stats.record(DownloadOutcome::Done);
        stats.record(DownloadOutcome::AlreadyExists);
        stats.record(DownloadOutcome::Failed);
        assert_eq!(stats.done, 2);
        assert_eq!(stats.already_exists, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn default_options_keep_archives() {
        let options = DownloadOptions::default();
        assert!(!options.assemble_video);
        assert!(options.save_dir.is_none());
        assert!(DownloadOptions::assembling().assemble_video);
    }
}
