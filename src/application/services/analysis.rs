//! Audio file analysis
//!
//! Feeds a decoded file through the spectrogram hop by hop, the way a live
//! stream would arrive, and records the loudest peak seen.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{wav, DomainError, Peak, Spectrogram, HOP_SIZE};
use crate::infrastructure::traits::FileSystem;

/// Audio file extensions accepted on the command line.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3"];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f64,
    /// Number of full frames processed
    pub frames: usize,
    /// Loudest peak across all frames
    pub peak: Option<Peak>,
}

pub struct AnalysisService {
    fs: Arc<dyn FileSystem>,
}

impl AnalysisService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Whether `path` names a file this tool treats as audio input.
    pub fn is_audio_path(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    #[instrument(skip(self, settings))]
    pub fn analyze(&self, path: &Path, settings: &Settings) -> ApplicationResult<AnalysisReport> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if extension != "wav" {
            return Err(DomainError::UnsupportedAudio(format!(
                "{extension} decoding is not available, convert to wav first"
            ))
            .into());
        }

        let bytes = self.fs.read(path).with_path_context("read audio file", path)?;
        let audio = wav::decode(&bytes)?;
        debug!(
            sample_rate = audio.sample_rate,
            channels = audio.channels,
            frames = audio.frame_count(),
            "decoded"
        );

        let mut spectrogram = Spectrogram::new(settings.spectrogram_params(audio.sample_rate));
        let mut frames = 0;
        let mut loudest: Option<Peak> = None;

        for hop in audio.to_mono().chunks_exact(HOP_SIZE) {
            if !spectrogram.push_samples(hop) {
                continue;
            }
            spectrogram.process();
            frames += 1;
            if let Some(peak) = spectrogram.peak() {
                if loudest.map_or(true, |l| peak.level > l.level) {
                    loudest = Some(peak);
                }
            }
        }
        info!(frames, "analysis complete");

        Ok(AnalysisReport {
            path: path.to_path_buf(),
            sample_rate: audio.sample_rate,
            channels: audio.channels,
            duration_secs: audio.duration_secs(),
            frames,
            peak: loudest,
        })
    }
}
