//! Followed-artist enumeration

use super::PixivDownloader;
use crate::api::{ApiEnvelope, FollowingBody};
use crate::error::Result;
use crate::types::ArtistId;
use tracing::{debug, warn};

/// Upper bound on following-list pages; a well-formed server returns an
/// empty page long before this
const MAX_FOLLOWING_PAGES: usize = 10_000;

impl PixivDownloader {
    /// List every artist the session's account follows
    ///
    /// Pages through the following-list endpoint until the first empty page,
    /// concatenating pages in order and preserving each page's author order.
    pub async fn list_followed_artists(&self) -> Result<Vec<ArtistId>> {
        let page_size = self.config.page_size;
        let mut artists = Vec::new();

        for page in 0..MAX_FOLLOWING_PAGES {
            let url = format!(
                "{}/ajax/user/{}/following?offset={}&limit={}&rest=show",
                self.config.api_base,
                self.config.user_id,
                page * page_size,
                page_size
            );
            let envelope: ApiEnvelope<FollowingBody> = self.client.get_json(&url).await?;
            let body = envelope.into_body()?;

            if body.users.is_empty() {
                debug!(pages = page, total = artists.len(), "following list exhausted");
                return Ok(artists);
            }

            debug!(page, count = body.users.len(), "fetched following page");
            artists.extend(body.users.into_iter().map(|user| ArtistId(user.user_id)));
        }

        warn!(
            pages = MAX_FOLLOWING_PAGES,
            total = artists.len(),
            "following list never returned an empty page, stopping at the page cap"
        );
        Ok(artists)
    }
}
