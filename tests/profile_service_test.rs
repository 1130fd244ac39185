//! Tests for ProfileService against a real filesystem in a temp directory.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use a2i::application::services::{LoadWarning, ProfileService};
use a2i::application::ApplicationError;
use a2i::config::{Settings, DEFAULT_PROFILE};
use a2i::domain::WindowFunction;
use a2i::infrastructure::traits::RealFileSystem;
use a2i::util::testing;

fn service(temp: &TempDir) -> (ProfileService, PathBuf) {
    testing::init_test_setup();
    let path = temp.path().join(".a2i").join("config.json");
    (ProfileService::new(Arc::new(RealFileSystem), path.clone()), path)
}

// ============================================================
// load() tests
// ============================================================

#[test]
fn given_no_file_when_load_then_defaults_with_file_warning() {
    let temp = TempDir::new().unwrap();
    let (profiles, path) = service(&temp);

    let report = profiles.load(DEFAULT_PROFILE).expect("load");

    assert_eq!(report.settings, Settings::default());
    assert_eq!(report.warnings, vec![LoadWarning::FileUnavailable(path)]);
    assert!(report.warnings[0]
        .to_string()
        .starts_with("Failed to open config file"));
}

#[test]
fn given_partial_profile_when_load_then_missing_keys_from_defaults() {
    let temp = TempDir::new().unwrap();
    let (profiles, path) = service(&temp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        r#"{"live": {"frame_size": 2048, "window": "hann", "frequency_range": "30,15000"}}"#,
    )
    .unwrap();

    let report = profiles.load("live").expect("load");

    assert!(report.warnings.is_empty());
    assert_eq!(report.settings.frame_size, 2048);
    assert_eq!(report.settings.window, WindowFunction::Hann);
    assert_eq!(report.settings.frequency_range.first, 30);
    assert_eq!(report.settings.multiplier, Settings::default().multiplier);
}

#[test]
fn given_unknown_key_when_load_then_warns_and_ignores() {
    let temp = TempDir::new().unwrap();
    let (profiles, path) = service(&temp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"default": {"fps": 60}}"#).unwrap();

    let report = profiles.load(DEFAULT_PROFILE).expect("load");

    assert_eq!(report.settings, Settings::default());
    assert_eq!(report.warnings, vec![LoadWarning::UnknownKey("fps".into())]);
}

#[test]
fn given_missing_profile_when_load_then_defaults_with_warning() {
    let temp = TempDir::new().unwrap();
    let (profiles, _) = service(&temp);
    profiles.reset_default().unwrap();

    let report = profiles.load("stage").expect("load");

    assert_eq!(report.settings, Settings::default());
    assert_eq!(report.warnings, vec![LoadWarning::ProfileMissing("stage".into())]);
}

#[test]
fn given_malformed_file_when_load_then_parse_error() {
    let temp = TempDir::new().unwrap();
    let (profiles, path) = service(&temp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[1, 2]").unwrap();

    let result = profiles.load(DEFAULT_PROFILE);

    assert!(matches!(result, Err(ApplicationError::ConfigParse { .. })));
}

#[test]
fn given_bad_value_when_load_then_parse_error_names_profile() {
    let temp = TempDir::new().unwrap();
    let (profiles, path) = service(&temp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"live": {"line_color": "300,0,0"}}"#).unwrap();

    let err = profiles.load("live").unwrap_err();

    assert!(err.to_string().contains("configuration 'live'"), "{err}");
}

// ============================================================
// write_profile() / rename_profile() / reset_default() tests
// ============================================================

#[test]
fn given_existing_profiles_when_write_then_others_kept() {
    let temp = TempDir::new().unwrap();
    let (profiles, _) = service(&temp);
    profiles.reset_default().unwrap();
    let live = Settings {
        frame_size: 1024,
        ..Settings::default()
    };

    profiles.write_profile("live", &live).unwrap();

    assert_eq!(profiles.profile_names().unwrap(), vec!["default", "live"]);
    assert_eq!(profiles.load("live").unwrap().settings, live);
}

#[test]
fn given_profile_when_rename_then_moved() {
    let temp = TempDir::new().unwrap();
    let (profiles, _) = service(&temp);
    profiles.write_profile("a", &Settings::default()).unwrap();

    profiles.rename_profile("a", "b").unwrap();

    assert_eq!(profiles.profile_names().unwrap(), vec!["b"]);
}

#[test]
fn given_target_exists_when_rename_then_rejected() {
    let temp = TempDir::new().unwrap();
    let (profiles, _) = service(&temp);
    profiles.write_profile("a", &Settings::default()).unwrap();
    profiles.write_profile("b", &Settings::default()).unwrap();

    let result = profiles.rename_profile("a", "b");

    assert!(matches!(result, Err(ApplicationError::ProfileExists(name)) if name == "b"));
}

#[test]
fn given_no_file_when_rename_then_not_found() {
    let temp = TempDir::new().unwrap();
    let (profiles, _) = service(&temp);

    let result = profiles.rename_profile("a", "b");

    assert!(matches!(result, Err(ApplicationError::ProfileNotFound(_))));
}

#[test]
fn given_no_directory_when_reset_default_then_created() {
    let temp = TempDir::new().unwrap();
    let (profiles, path) = service(&temp);

    profiles.reset_default().unwrap();

    assert!(path.exists());
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with('\n'));
    assert_eq!(profiles.profile_names().unwrap(), vec![DEFAULT_PROFILE]);
}

#[test]
fn given_parent_is_file_when_reset_default_then_write_error() {
    let temp = TempDir::new().unwrap();
    let (profiles, path) = service(&temp);
    fs::write(path.parent().unwrap(), "").unwrap();

    let err = profiles.reset_default().unwrap_err();

    assert!(matches!(err, ApplicationError::ConfigWrite { .. }));
    assert!(err
        .to_string()
        .starts_with("Failed to open config file for writing"));
}
