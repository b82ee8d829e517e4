//! Integration tests for the Super Ball launcher
//!
//! Tests settings persistence, statistics, folder rebasing and the launch
//! flow end to end against a temporary game folder.

use parking_lot::Mutex;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use superball_launcher::{
    config::{ConfigStore, Language, Theme, Version, keys},
    controller::{LaunchState, LauncherController, OpenError},
    error::{LauncherError, get_user_friendly_error},
    paths::PathResolver,
    stats::StatsService,
};
use tempfile::TempDir;

/// Opener that only remembers what it was asked to open
fn recording_opener() -> (
    Arc<Mutex<Vec<PathBuf>>>,
    impl Fn(&Path) -> Result<(), OpenError>,
) {
    let opened = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&opened);
    (opened, move |path: &Path| {
        sink.lock().push(path.to_path_buf());
        Ok(())
    })
}

fn write_game(dir: &Path, language: Language) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(language.file_name());
    std::fs::write(&path, "<!doctype html><title>Super Ball</title>").unwrap();
    path
}

fn config_path(dir: &TempDir) -> PathBuf {
    dir.path().join("game_config.json")
}

/// Test that a partial settings file is gap-filled and merging twice changes nothing
#[test]
fn test_partial_settings_file_is_gap_filled() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        config_path(&dir),
        r#"{"language": "English", "play_count": 12, "window_position": {"x": 5, "y": 6}}"#,
    )
    .unwrap();

    let first = ConfigStore::open(config_path(&dir));
    assert_eq!(first.language(), Language::English);
    assert_eq!(first.play_count(), 12);
    assert_eq!(first.version(), Version::V2_0);
    assert_eq!(first.theme(), Theme::Dark);
    assert_eq!(first.last_played(), "");
    assert_eq!(first.get(keys::AUTO_LAUNCH), Some(&json!(false)));

    // Persist the merged document, then load again
    first.save();
    let second = ConfigStore::open(config_path(&dir));
    assert_eq!(first.document(), second.document());
}

/// Test that set is visible immediately and after a fresh load
#[test]
fn test_write_then_read_and_durability() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::open(config_path(&dir));

    store.set(keys::VERSION, "v1.0");
    assert_eq!(store.get(keys::VERSION), Some(&json!("v1.0")));

    let fresh = ConfigStore::open(config_path(&dir));
    assert_eq!(fresh.version(), Version::V1_0);
}

/// Test that keys unknown to the launcher are carried through every write
#[test]
fn test_forward_compatible_keys_preserved() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        config_path(&dir),
        r#"{"future_setting": {"nested": [1, 2, 3]}, "theme": "light"}"#,
    )
    .unwrap();

    let shared = ConfigStore::open_shared(config_path(&dir));
    StatsService::new(shared.clone()).record_play_at("2025-06-01T10:00:00");

    let text = std::fs::read_to_string(config_path(&dir)).unwrap();
    let written: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(written["future_setting"], json!({"nested": [1, 2, 3]}));
    assert_eq!(written["theme"], json!("light"));
    assert_eq!(written["play_count"], json!(1));
}

/// Test that N recorded plays give a count of N and the last stamp
#[test]
fn test_record_play_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let shared = ConfigStore::open_shared(config_path(&dir));
    let stats = StatsService::new(shared);

    let stamps = [
        "2025-06-01T10:00:00",
        "2025-06-02T11:30:00",
        "2025-06-03T09:15:00",
    ];
    for stamp in stamps {
        stats.record_play_at(stamp);
    }

    let summary = stats.summary();
    assert_eq!(summary.play_count, 3);
    assert_eq!(summary.last_played, "2025-06-03T09:15:00");
    assert_eq!(summary.last_played_display, "2025-06-03");
}

/// Test rebasing onto a folder that only holds the Chinese file
#[test]
fn test_rebase_with_single_variant() {
    let dir = tempfile::tempdir().unwrap();
    let games = dir.path().join("games");
    let chinese = write_game(&games, Language::Chinese);

    let shared = ConfigStore::open_shared(config_path(&dir));
    let resolver = PathResolver::new(shared.clone());
    let english_before = resolver.resolve(Language::English);

    let outcome = resolver.rebase(&games);
    assert_eq!(outcome.status_message(), "Game folder updated");
    assert_eq!(resolver.resolve(Language::Chinese), chinese);
    assert_eq!(resolver.resolve(Language::English), english_before);
    assert!(resolver.exists(Language::Chinese));
    assert!(!resolver.exists(Language::English));
}

/// Test the full launch flow for a missing and then an available file
#[test]
fn test_launch_flow_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let games = dir.path().join("super_ball-HTMLfile");
    let shared = ConfigStore::open_shared(config_path(&dir));
    let (opened, opener) = recording_opener();
    let mut controller = LauncherController::new(shared.clone(), opener);

    shared.lock().set(
        keys::ENGLISH_PATH,
        games
            .join(Language::English.file_name())
            .to_string_lossy()
            .into_owned(),
    );

    // Not there yet: nothing recorded, nothing opened
    let error = controller
        .start_game(Language::English, Version::V2_0)
        .unwrap_err();
    assert!(matches!(error, LauncherError::GameFileNotFound(_)));
    assert!(get_user_friendly_error(&error).contains("super_ball-english.html"));
    assert_eq!(shared.lock().play_count(), 0);
    assert!(opened.lock().is_empty());
    assert_eq!(controller.state(), LaunchState::Idle);

    // Install the file and try again
    write_game(&games, Language::English);
    let report = controller
        .start_game(Language::English, Version::V2_0)
        .unwrap();
    assert_eq!(report.message, "Game launched: English v2.0");
    assert_eq!(report.stats.play_count, 1);
    assert_eq!(opened.lock().len(), 1);
    assert_eq!(controller.state(), LaunchState::Idle);

    // And the count is on disk
    assert_eq!(ConfigStore::open(config_path(&dir)).play_count(), 1);
}

/// Test that a corrupted settings file never blocks startup and is replaced on first write
#[test]
fn test_corrupted_settings_recover_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(config_path(&dir), "\u{feff}{{{ definitely broken").unwrap();

    let shared = ConfigStore::open_shared(config_path(&dir));
    let controller = LauncherController::with_browser(shared);
    assert_eq!(controller.summary().last_played_display, "Never");

    controller.change_theme(Theme::Light);
    let reloaded = ConfigStore::open(config_path(&dir));
    assert_eq!(reloaded.theme(), Theme::Light);
    assert_eq!(reloaded.language(), Language::Chinese);
}
