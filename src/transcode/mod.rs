//! Frame archive to video transcoding
//!
//! An ugoira animation arrives as a deflate-compressed archive of still
//! frames. The pipeline persists the archive, extracts the frames into a
//! sibling temp directory, validates their dimensions, hands them to a
//! [`FrameEncoder`] in archive order, and removes every temporary artifact.
//!
//! Archive order is load-bearing: frames are stored in playback order, and
//! reordering them would scramble the motion.

mod encoder;

pub use encoder::{FfmpegEncoder, FrameEncoder};

use crate::error::{Result, TranscodeError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Assemble a frame archive into a video file
///
/// `archive_path` is where the raw archive bytes are persisted while frames
/// are extracted; `output` is the final video path. On success every
/// temporary artifact (the archive file, the extracted frames, the temp
/// directory) has been removed and only the video remains.
///
/// A failure between extraction and cleanup (bad frame, encoder error)
/// returns the error with the archive file and temp directory left on disk.
pub async fn archive_to_video(
    archive_path: &Path,
    archive_bytes: &[u8],
    output: &Path,
    fps: u32,
    encoder: &dyn FrameEncoder,
) -> Result<PathBuf> {
    tokio::fs::write(archive_path, archive_bytes).await?;

    let (frames_dir, frames) = extract_frames(archive_path)?;
    let (width, height) = validate_frame_dimensions(archive_path, &frames)?;
    info!(
        archive = %archive_path.display(),
        frames = frames.len(),
        width,
        height,
        fps,
        encoder = encoder.name(),
        "assembling video"
    );

    encoder.encode(&frames, fps, output).await?;

    tokio::fs::remove_dir_all(&frames_dir).await?;
    tokio::fs::remove_file(archive_path).await?;
    debug!(output = %output.display(), "video assembled, temp artifacts removed");

    Ok(output.to_path_buf())
}

/// Directory the archive's frames are extracted into
fn frames_dir_for(archive_path: &Path) -> PathBuf {
    let mut name = OsString::from(archive_path.as_os_str());
    name.push("_frames");
    PathBuf::from(name)
}

/// Extract every archive entry in stored order
///
/// Returns the temp directory and the extracted frame paths, ordered as the
/// archive stores them.
fn extract_frames(archive_path: &Path) -> Result<(PathBuf, Vec<PathBuf>)> {
    let file = std::fs::File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| TranscodeError::Archive {
            archive: archive_path.to_path_buf(),
            reason: format!("not a readable archive: {e}"),
        })?;

    if archive.len() == 0 {
        return Err(TranscodeError::EmptyArchive {
            archive: archive_path.to_path_buf(),
        }
        .into());
    }

    let frames_dir = frames_dir_for(archive_path);
    std::fs::create_dir_all(&frames_dir)?;

    let mut frames = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| TranscodeError::Archive {
            archive: archive_path.to_path_buf(),
            reason: format!("failed to read entry {index}: {e}"),
        })?;

        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            warn!(index, "skipping entry with unsafe path");
            continue;
        };

        let dest = frames_dir.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out = std::fs::File::create(&dest)?;
        std::io::copy(&mut entry, &mut out)?;
        frames.push(dest);
    }

    if frames.is_empty() {
        return Err(TranscodeError::EmptyArchive {
            archive: archive_path.to_path_buf(),
        }
        .into());
    }

    debug!(archive = %archive_path.display(), frames = frames.len(), "frames extracted");
    Ok((frames_dir, frames))
}

/// Probe the first frame's dimensions and require every frame to match
///
/// Mixed-size frames would corrupt the encoded output, so a mismatch fails
/// loudly instead of encoding garbage.
fn validate_frame_dimensions(archive_path: &Path, frames: &[PathBuf]) -> Result<(u32, u32)> {
    let first = frames.first().ok_or_else(|| TranscodeError::EmptyArchive {
        archive: archive_path.to_path_buf(),
    })?;

    let (expected_width, expected_height) =
        image::image_dimensions(first).map_err(|e| TranscodeError::FrameDecode {
            frame: first.clone(),
            reason: e.to_string(),
        })?;

    for frame in &frames[1..] {
        let (width, height) =
            image::image_dimensions(frame).map_err(|e| TranscodeError::FrameDecode {
                frame: frame.clone(),
                reason: e.to_string(),
            })?;
        if (width, height) != (expected_width, expected_height) {
            return Err(TranscodeError::SizeMismatch {
                frame: frame.clone(),
                expected_width,
                expected_height,
                width,
                height,
            }
            .into());
        }
    }

    Ok((expected_width, expected_height))
}
