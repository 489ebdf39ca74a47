//! Frame encoders
//!
//! Video assembly is delegated to a [`FrameEncoder`] so the pipeline can be
//! exercised without an encoder binary installed. The production
//! implementation drives the external `ffmpeg` binary.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Encoder turning an ordered frame sequence into a video file
#[async_trait]
pub trait FrameEncoder: Send + Sync {
    /// Encode `frames` (in sequence order) at `fps` into `output`
    async fn encode(&self, frames: &[PathBuf], fps: u32, output: &Path) -> Result<()>;

    /// Short identifier for logging
    fn name(&self) -> &'static str;
}

/// CLI-based encoder using the external ffmpeg binary
///
/// Frames are fed through ffmpeg's concat demuxer, which preserves the exact
/// sequence order regardless of the frame file names, and encoded as H.264
/// with yuv420p pixels for wide player compatibility.
///
/// # Examples
///
/// ```no_run
/// use pixiv_dl::transcode::FfmpegEncoder;
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let encoder = FfmpegEncoder::new(PathBuf::from("/usr/bin/ffmpeg"));
///
/// // Or auto-discover from PATH
/// let encoder = FfmpegEncoder::from_path().expect("ffmpeg not found in PATH");
/// ```
#[derive(Debug)]
pub struct FfmpegEncoder {
    binary_path: PathBuf,
}

impl FfmpegEncoder {
    /// Create a new encoder with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find ffmpeg in PATH
    ///
    /// Uses the `which` crate to search the system PATH. Returns `None` when
    /// the binary is not found.
    pub fn from_path() -> Option<Self> {
        which::which("ffmpeg").ok().map(Self::new)
    }

    /// Resolve an encoder from the video configuration
    ///
    /// An explicit `ffmpeg_path` wins; otherwise PATH is searched when
    /// `search_path` is set. Fails with [`Error::NotSupported`] when no
    /// binary can be located.
    pub fn resolve(config: &crate::config::VideoConfig) -> Result<Self> {
        if let Some(path) = &config.ffmpeg_path {
            return Ok(Self::new(path.clone()));
        }
        if config.search_path
            && let Some(encoder) = Self::from_path()
        {
            return Ok(encoder);
        }
        Err(Error::NotSupported(
            "ffmpeg not found; set video.ffmpeg_path or install ffmpeg to assemble videos"
                .to_string(),
        ))
    }

    /// Build the concat-demuxer file listing every frame with its display duration
    ///
    /// The final frame is listed a second time so the demuxer applies the last
    /// duration directive (a quirk of the concat format).
    fn concat_list(frames: &[PathBuf], fps: u32) -> String {
        let frame_duration = 1.0 / f64::from(fps.max(1));
        let mut list = String::from("ffconcat version 1.0\n");
        for frame in frames {
            let escaped = frame.to_string_lossy().replace('\'', r"'\''");
            list.push_str(&format!("file '{escaped}'\nduration {frame_duration:.6}\n"));
        }
        if let Some(last) = frames.last() {
            let escaped = last.to_string_lossy().replace('\'', r"'\''");
            list.push_str(&format!("file '{escaped}'\n"));
        }
        list
    }
}

#[async_trait]
impl FrameEncoder for FfmpegEncoder {
    async fn encode(&self, frames: &[PathBuf], fps: u32, output: &Path) -> Result<()> {
        let Some(first) = frames.first() else {
            return Err(Error::ExternalTool("no frames to encode".to_string()));
        };
        let list_path = first
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("frames.ffconcat");
        tokio::fs::write(&list_path, Self::concat_list(frames, fps)).await?;

        let run = Command::new(&self.binary_path)
            .arg("-y")
            .args(["-f", "concat", "-safe", "0"])
            .arg("-i")
            .arg(&list_path)
            .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .arg("-r")
            .arg(fps.to_string())
            .arg(output)
            .output()
            .await
            .map_err(|e| Error::ExternalTool(format!("failed to execute ffmpeg: {e}")))?;

        if !run.status.success() {
            let stderr = String::from_utf8_lossy(&run.stderr);
            let detail = stderr.lines().last().unwrap_or("no output").to_string();
            return Err(Error::ExternalTool(format!(
                "ffmpeg exited with {}: {detail}",
                run.status
            )));
        }

        tracing::debug!(frames = frames.len(), fps, output = %output.display(), "frames encoded");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cli-ffmpeg"
    }
}
