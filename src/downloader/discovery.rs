//! Media link discovery for one artist
//!
//! Each artwork id is probed against two endpoints: the animation metadata
//! endpoint first, then the static pages endpoint. An artwork whose
//! animation metadata comes back without an error flag is an animated
//! frame sequence with a single archive URL; anything else is a static
//! (possibly multi-page) illustration. That probe order is the upstream
//! API's contract, not a heuristic.

use super::PixivDownloader;
use crate::api::{ApiEnvelope, IllustPage, ProfileBody, UgoiraMetaBody};
use crate::error::{Error, Result};
use crate::types::ArtistId;
use crate::worker_pool::run_partitioned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

impl PixivDownloader {
    /// Discover every downloadable media URL published by `artist_id`
    ///
    /// Fetches the artist's artwork-id list once, then resolves each
    /// artwork's media URLs on the session's worker pool. The returned list
    /// is ordered by (artwork, page) regardless of worker interleaving, so
    /// the result is deterministic across runs. An artwork that fails to
    /// resolve is logged and skipped; it never aborts its siblings.
    pub async fn discover_media_links(&self, artist_id: &ArtistId) -> Result<Vec<String>> {
        let url = format!(
            "{}/ajax/user/{}/profile/all?lang=zh",
            self.config.api_base, artist_id
        );
        let envelope: ApiEnvelope<ProfileBody> = self.client.get_json(&url).await?;
        let mut illust_ids: Vec<String> = envelope.into_body()?.illusts.into_keys().collect();

        // The response maps artwork id to a stub; the key order is not
        // meaningful, so sort newest-first for a stable crawl order
        illust_ids.sort_by_key(|id| std::cmp::Reverse(id.parse::<u64>().unwrap_or(0)));
        info!(artist = %artist_id, works = illust_ids.len(), "discovering media links");

        let links: Arc<Mutex<Vec<((usize, usize), String)>>> = Arc::new(Mutex::new(Vec::new()));

        let session = self.clone();
        let sink = Arc::clone(&links);
        run_partitioned(
            self.config.worker_count,
            illust_ids,
            move |index, illust_id| {
                let session = session.clone();
                let sink = Arc::clone(&sink);
                async move {
                    debug!(illust = %illust_id, "resolving media links");
                    match session.illust_media_links(&illust_id).await {
                        Ok(urls) => {
                            let mut guard = sink.lock().await;
                            for (page, url) in urls.into_iter().enumerate() {
                                guard.push(((index, page), url));
                            }
                        }
                        Err(e) => {
                            warn!(illust = %illust_id, error = %e, "failed to resolve media links, skipping");
                        }
                    }
                }
            },
        )
        .await;

        let mut collected = {
            let mut guard = links.lock().await;
            std::mem::take(&mut *guard)
        };
        collected.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(collected.into_iter().map(|(_, url)| url).collect())
    }

    /// Resolve the media URLs of one artwork
    ///
    /// Both endpoints are queried; the animation metadata decides the route.
    async fn illust_media_links(&self, illust_id: &str) -> Result<Vec<String>> {
        let meta_url = format!(
            "{}/ajax/illust/{}/ugoira_meta?lang=zh",
            self.config.api_base, illust_id
        );
        let pages_url = format!(
            "{}/ajax/illust/{}/pages?lang=zh",
            self.config.api_base, illust_id
        );

        // An HTTP-level failure on the metadata endpoint means "not an
        // animation" just like an error envelope does
        let meta = match self
            .client
            .get_json::<ApiEnvelope<UgoiraMetaBody>>(&meta_url)
            .await
        {
            Ok(envelope) => Some(envelope),
            Err(Error::Network(e)) if e.status().is_some() => None,
            Err(e) => return Err(e),
        };
        let pages = self
            .client
            .get_json::<ApiEnvelope<Vec<IllustPage>>>(&pages_url)
            .await?;

        if let Some(envelope) = meta
            && !envelope.error
            && let Some(body) = envelope.body
        {
            debug!(illust = illust_id, "animated frame sequence");
            return Ok(vec![body.original_src]);
        }

        let pages = pages.into_body()?;
        debug!(illust = illust_id, pages = pages.len(), "static illustration");
        Ok(pages.into_iter().map(|page| page.urls.original).collect())
    }
}
