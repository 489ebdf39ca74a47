//! Pixiv AJAX API response models
//!
//! Every endpoint wraps its payload in the same envelope:
//! `{"error": <bool>, "message": <string>, "body": <payload>}`.
//! The body is `null` (or missing) when `error` is true.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Common envelope wrapping every AJAX response
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the endpoint reported an error
    pub error: bool,

    /// Human-readable message accompanying an error (often empty)
    #[serde(default)]
    pub message: String,

    /// The payload; absent when `error` is true
    #[serde(default)]
    pub body: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning the envelope's error flag into [`Error::Api`]
    pub fn into_body(self) -> Result<T> {
        if self.error {
            let detail = if self.message.is_empty() {
                "remote reported an error".to_string()
            } else {
                self.message
            };
            return Err(Error::Api(detail));
        }
        self.body
            .ok_or_else(|| Error::Api("response body missing".to_string()))
    }
}

/// One page of the following-list endpoint
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FollowingBody {
    /// Followed users on this page, in the server's order
    #[serde(default)]
    pub users: Vec<FollowedUser>,
}

/// One followed user entry
#[derive(Clone, Debug, Deserialize)]
pub struct FollowedUser {
    /// The user's account id
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Body of the artist-profile endpoint (`/ajax/user/{id}/profile/all`)
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfileBody {
    /// Map of artwork id to a stub value; only the keys matter
    #[serde(default)]
    pub illusts: HashMap<String, serde_json::Value>,
}

/// Body of the animation-metadata endpoint (`/ajax/illust/{id}/ugoira_meta`)
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UgoiraMetaBody {
    /// URL of the original-quality frame archive
    #[serde(rename = "originalSrc")]
    pub original_src: String,
}

/// One page of a static multi-page illustration
#[derive(Clone, Debug, Deserialize)]
pub struct IllustPage {
    /// URLs of this page at the various quality levels
    pub urls: PageUrls,
}

/// Quality-level URLs of one illustration page
#[derive(Clone, Debug, Deserialize)]
pub struct PageUrls {
    /// URL of the original-quality image
    pub original: String,
}
