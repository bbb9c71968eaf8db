use bevy::asset::io::Reader;
use bevy::prelude::*;
use bevy::tasks::futures_lite::AsyncReadExt;
use constants::render_settings::{LOAD_CHUNK_BYTES, PROGRESS_LOG_STEP_PERCENT};

/// Bytes received for one model file against its expected size, when the
/// format lets us know it up front.
#[derive(Debug, Clone)]
pub struct LoadProgress {
    expected: Option<u64>,
    received: u64,
    next_log_percent: f32,
}

impl LoadProgress {
    pub fn new() -> Self {
        Self {
            expected: None,
            received: 0,
            next_log_percent: PROGRESS_LOG_STEP_PERCENT,
        }
    }

    pub fn set_expected(&mut self, expected: Option<u64>) {
        self.expected = expected.filter(|len| *len > 0);
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn percent(&self) -> Option<f32> {
        self.expected
            .map(|expected| (self.received as f64 / expected as f64 * 100.0).min(100.0) as f32)
    }

    /// Record `bytes` more. Returns the percentage once it crosses the next
    /// logging step.
    pub fn advance(&mut self, bytes: usize) -> Option<f32> {
        self.received += bytes as u64;
        let percent = self.percent()?;
        if percent + f32::EPSILON < self.next_log_percent {
            return None;
        }
        while self.next_log_percent <= percent + f32::EPSILON {
            self.next_log_percent += PROGRESS_LOG_STEP_PERCENT;
        }
        Some(percent)
    }

    /// End of stream. Reports 100% unless that was already reported, which
    /// covers files whose size the header cannot tell (ASCII PLY, LAZ).
    pub fn finish(&mut self) -> Option<f32> {
        if self.next_log_percent > 100.0 {
            return None;
        }
        self.next_log_percent = 100.0 + PROGRESS_LOG_STEP_PERCENT;
        Some(100.0)
    }
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the whole asset in chunks, logging percentage loaded as it goes.
///
/// `expected_len` is given the first chunk and may derive the total file size
/// from the format header.
pub async fn read_with_progress(
    reader: &mut dyn Reader,
    path: &str,
    expected_len: impl Fn(&[u8]) -> Option<u64>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut bytes = Vec::new();
    let mut chunk = vec![0u8; LOAD_CHUNK_BYTES];
    let mut progress = LoadProgress::new();
    let mut probed = false;

    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);

        if !probed {
            progress.set_expected(expected_len(&bytes));
            probed = true;
        }

        if let Some(percent) = progress.advance(read) {
            debug!("{path}: {percent:.0}% loaded");
        }
    }

    if let Some(percent) = progress.finish() {
        debug!("{path}: {percent:.0}% loaded");
    }
    info!("{path}: loaded {} bytes", progress.received());
    Ok(bytes)
}
