//! Per-URL download state machine and batch artist download
//!
//! Downloads are idempotent per target path: a file that already exists
//! (either as the raw media or as the video a frame archive was assembled
//! into) is skipped without touching the network. Transport faults are
//! retried under the session's budget and surface as
//! [`DownloadOutcome::Failed`], never as an abort of the whole run.

use super::PixivDownloader;
use crate::error::{Error, Result};
use crate::filename;
use crate::retry::fetch_with_retry;
use crate::transcode;
use crate::types::{ArtistId, DownloadOptions, DownloadOutcome, DownloadStats};
use crate::worker_pool::run_partitioned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

impl PixivDownloader {
    /// Download one media URL
    ///
    /// State machine per URL: resolve the target path, skip if the file (or
    /// its assembled video) already exists, fetch with the retry budget,
    /// then either write the bytes verbatim or assemble a frame archive
    /// into a video.
    ///
    /// Exactly one output file is written on `Done`; none on
    /// `AlreadyExists` or `Failed`.
    pub async fn download(&self, url: &str, options: &DownloadOptions) -> Result<DownloadOutcome> {
        let save_dir = options
            .save_dir
            .as_deref()
            .unwrap_or(self.config.save_dir.as_path());
        let target = save_dir.join(filename::derive_file_name(url)?);

        tokio::fs::create_dir_all(save_dir).await?;

        // Dual existence check: an assembled archive only exists under the
        // video name
        if tokio::fs::try_exists(&target).await? {
            debug!(target = %target.display(), "already exists, skipping");
            return Ok(DownloadOutcome::AlreadyExists);
        }
        if let Some(video) = filename::video_sibling(&target)
            && tokio::fs::try_exists(&video).await?
        {
            debug!(video = %video.display(), "assembled video already exists, skipping");
            return Ok(DownloadOutcome::AlreadyExists);
        }

        let fetched = fetch_with_retry(&self.config.retry, || async move {
            let response = self.client.get(url).await?;
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string();
            let bytes = response.bytes().await?;
            Ok::<_, Error>((content_type, bytes))
        })
        .await;

        let (content_type, bytes) = match fetched {
            Ok(fetched) => fetched,
            Err(Error::Network(e)) => {
                warn!(url, error = %e, "fetch failed, giving up on this URL");
                return Ok(DownloadOutcome::Failed);
            }
            Err(e) => return Err(e),
        };

        if content_type == ARCHIVE_CONTENT_TYPE && options.assemble_video {
            let encoder = self.encoder.as_deref().ok_or_else(|| {
                Error::NotSupported(
                    "video assembly requested but no frame encoder is available".to_string(),
                )
            })?;
            let video = target.with_extension("mp4");
            transcode::archive_to_video(&target, &bytes, &video, self.config.video.fps, encoder)
                .await?;
            info!(video = %video.display(), "assembled");
        } else {
            tokio::fs::write(&target, &bytes).await?;
            debug!(target = %target.display(), bytes = bytes.len(), "written");
        }

        Ok(DownloadOutcome::Done)
    }

    /// Download every artwork published by `artist_id`
    ///
    /// Runs the discovery phase, then fans the discovered URLs out over the
    /// session's worker pool; each phase joins its own pool before the next
    /// starts. Per-URL failures are counted, never propagated — the
    /// returned stats are the run's only failure report.
    pub async fn download_artist(
        &self,
        artist_id: &ArtistId,
        options: &DownloadOptions,
    ) -> Result<DownloadStats> {
        let links = self.discover_media_links(artist_id).await?;
        info!(artist = %artist_id, links = links.len(), "starting downloads");

        let stats = Arc::new(Mutex::new(DownloadStats::default()));

        let session = self.clone();
        let options = Arc::new(options.clone());
        let tally = Arc::clone(&stats);
        run_partitioned(self.config.worker_count, links, move |_, url| {
            let session = session.clone();
            let options = Arc::clone(&options);
            let tally = Arc::clone(&tally);
            async move {
                let outcome = match session.download(&url, &options).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(url = %url, error = %e, "download errored");
                        DownloadOutcome::Failed
                    }
                };
                tally.lock().await.record(outcome);
            }
        })
        .await;

        let stats = {
            let guard = stats.lock().await;
            *guard
        };
        info!(
            artist = %artist_id,
            done = stats.done,
            already_exists = stats.already_exists,
            failed = stats.failed,
            "artist download finished"
        );
        Ok(stats)
    }
}
