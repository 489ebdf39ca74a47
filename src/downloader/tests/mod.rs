//! Session-level tests against a mock API server

mod enumerate;

use crate::config::{Config, RetryConfig};
use crate::downloader::PixivDownloader;
use crate::error::Result;
use crate::transcode::FrameEncoder;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Frame encoder double that records the frames it was handed and writes a
/// marker file where the video would go
pub(crate) struct StubEncoder {
    pub(crate) frames_seen: Mutex<Vec<PathBuf>>,
}

impl StubEncoder {
    pub(crate) fn new() -> Self {
        Self {
            frames_seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FrameEncoder for StubEncoder {
    async fn encode(&self, frames: &[PathBuf], _fps: u32, output: &Path) -> Result<()> {
        self.frames_seen
            .lock()
            .unwrap()
            .extend(frames.iter().cloned());
        std::fs::write(output, b"video")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Config pointed at a mock server, with a fast retry policy
pub(crate) fn test_config(api_base: &str, save_dir: &Path) -> Config {
    Config {
        user_id: "123".to_string(),
        cookie: "PHPSESSID=test".to_string(),
        save_dir: save_dir.to_path_buf(),
        worker_count: 4,
        api_base: api_base.trim_end_matches('/').to_string(),
        retry: RetryConfig {
            max_attempts: 5,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
            jitter: false,
        },
        ..Default::default()
    }
}

/// Session wired to a mock server and a recording encoder
pub(crate) fn test_downloader(api_base: &str, save_dir: &Path) -> (PixivDownloader, Arc<StubEncoder>) {
    let encoder = Arc::new(StubEncoder::new());
    let downloader = PixivDownloader::with_encoder(
        test_config(api_base, save_dir),
        Arc::clone(&encoder) as Arc<dyn FrameEncoder>,
    )
    .unwrap();
    (downloader, encoder)
}

/// Write a small PNG frame
pub(crate) fn write_frame(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]))
        .save(path)
        .unwrap();
}

/// Build an in-memory frame archive from (entry name, frame bytes) pairs
pub(crate) fn frame_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut writer = ::zip::ZipWriter::new(&mut buffer);
        let options = ::zip::write::FileOptions::default()
            .compression_method(::zip::CompressionMethod::Stored);
        for (name, bytes) in entries {
            writer.start_file(*name, options).unwrap();
            std::io::Write::write_all(&mut writer, bytes).unwrap();
        }
        writer.finish().unwrap();
    }
    buffer.into_inner()
}
