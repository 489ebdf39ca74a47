//! Media URL to file name derivation
//!
//! Pixiv media URLs carry a date-stamped path under an `/img/` segment, e.g.
//! `https://i.pximg.net/img-original/img/2020/01/01/00/00/00/100_p0.png`.
//! The derived name flattens that path with underscores, which keeps names
//! deterministic and collision-free for distinct URLs of the same artwork.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static MEDIA_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\w+://[0-9A-Za-z.:_-]+/[A-Za-z_-]+/img/([0-9A-Za-z._/-]+)")
        .expect("media path pattern is valid")
});

/// Derive the target file name for a media URL
///
/// The mapping is deterministic: the same URL always resolves to the same
/// name. URLs without a recognizable image path fail with
/// [`Error::InvalidUrl`].
///
/// # Examples
///
/// ```
/// let name = pixiv_dl::filename::derive_file_name(
///     "https://i.pximg.net/img-original/img/2020/01/01/00/00/00/100_p0.png",
/// ).unwrap();
/// assert_eq!(name, "2020_01_01_00_00_00_100_p0.png");
/// ```
pub fn derive_file_name(url: &str) -> Result<String> {
    let captures = MEDIA_PATH.captures(url).ok_or_else(|| {
        Error::InvalidUrl(format!("no image path found in {url}"))
    })?;
    Ok(captures[1].replace('/', "_"))
}

/// Path of the video a frame archive at `path` would be assembled into
///
/// Returns `None` for non-archive paths. Used by the download skip check:
/// a successfully assembled archive no longer exists under its own name,
/// only under the video name.
pub fn video_sibling(path: &Path) -> Option<PathBuf> {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        .then(|| path.with_extension("mp4"))
}
