//! Tests for AnalysisService on generated WAV files.

use std::f32::consts::PI;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use a2i::application::services::AnalysisService;
use a2i::application::ApplicationError;
use a2i::config::Settings;
use a2i::domain::{wav, DomainError, WindowFunction};
use a2i::infrastructure::traits::RealFileSystem;
use a2i::util::testing;

fn analysis() -> AnalysisService {
    testing::init_test_setup();
    AnalysisService::new(Arc::new(RealFileSystem))
}

fn settings(frame_size: usize, window: WindowFunction) -> Settings {
    Settings {
        frame_size,
        window,
        ..Settings::default()
    }
}

fn tone(sample_rate: u32, frequency: f32, seconds: f32) -> Vec<f32> {
    let n = (sample_rate as f32 * seconds) as usize;
    (0..n)
        .map(|i| 0.5 * (2.0 * PI * frequency * i as f32 / sample_rate as f32).sin())
        .collect()
}

#[rstest]
#[case("a.wav", true)]
#[case("a.WAV", true)]
#[case("dir/b.mp3", true)]
#[case("a.flac", false)]
#[case("wav", false)]
#[case("invalid_command", false)]
fn given_path_when_checking_extension_then_audio_detected(
    #[case] path: &str,
    #[case] expected: bool,
) {
    assert_eq!(AnalysisService::is_audio_path(Path::new(path)), expected);
}

#[rstest]
#[case(WindowFunction::Hann, 1000.0)]
#[case(WindowFunction::BlackmanHarris, 2500.0)]
#[case(WindowFunction::FlatTop, 440.0)]
fn given_tone_when_analyzed_then_peak_near_tone(
    #[case] window: WindowFunction,
    #[case] frequency: f32,
) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tone.wav");
    fs::write(&path, wav::encode_pcm16(44_100, 1, &tone(44_100, frequency, 0.5))).unwrap();

    let report = analysis()
        .analyze(&path, &settings(4096, window))
        .expect("analyze");

    let peak = report.peak.expect("peak");
    let bin_width = 44_100.0 / 4096.0;
    assert!(
        (peak.frequency - f64::from(frequency)).abs() <= bin_width,
        "peak at {} Hz",
        peak.frequency
    );
    assert_eq!(report.sample_rate, 44_100);
    assert!(report.frames > 0);
}

#[test]
fn given_stereo_file_when_analyzed_then_channels_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("stereo.wav");
    let mono = tone(8_000, 500.0, 1.0);
    let interleaved: Vec<f32> = mono.iter().flat_map(|s| [*s, *s]).collect();
    fs::write(&path, wav::encode_pcm16(8_000, 2, &interleaved)).unwrap();

    let report = analysis()
        .analyze(&path, &settings(1024, WindowFunction::Hann))
        .unwrap();

    assert_eq!(report.channels, 2);
    assert!((report.duration_secs - 1.0).abs() < 1e-3);
}

#[test]
fn given_file_shorter_than_frame_when_analyzed_then_no_peak() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("short.wav");
    fs::write(&path, wav::encode_pcm16(8_000, 1, &tone(8_000, 500.0, 0.01))).unwrap();

    let report = analysis().analyze(&path, &Settings::default()).unwrap();

    assert_eq!(report.frames, 0);
    assert!(report.peak.is_none());
}

#[test]
fn given_garbage_when_analyzed_then_invalid_audio() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("noise.wav");
    fs::write(&path, b"definitely not riff").unwrap();

    let result = analysis().analyze(&path, &Settings::default());

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidAudio(_)))
    ));
}

#[test]
fn given_mp3_when_analyzed_then_unsupported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("song.mp3");
    fs::write(&path, b"ID3").unwrap();

    let result = analysis().analyze(&path, &Settings::default());

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::UnsupportedAudio(_)))
    ));
}
