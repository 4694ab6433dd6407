//! Integration tests for the command line

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, run_subplay, temp_config};

fn subplay() -> Command {
    let mut cmd = Command::cargo_bin("subplay").expect("binary is built");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_subplay(&["--help"]);

    assert_eq!(exit_code, 0);
    for name in ["play", "open", "cues", "config"] {
        assert!(stdout.contains(name), "missing {} in help", name);
    }
}

#[test]
fn version_includes_build_info() {
    subplay()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(concat!(
            "subplay ",
            env!("CARGO_PKG_VERSION"),
            " ("
        )));
}

#[test]
fn play_without_url_is_a_usage_error() {
    let (_stdout, stderr, exit_code) = run_subplay(&["play"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<URL>"));
}

// ============================================================================
// cues
// ============================================================================

#[test]
fn cues_prints_srt_transcript() {
    let (stdout, stderr, exit_code) = run_subplay(&["cues", &fixture("talk.srt")]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    insta::assert_snapshot!(stdout.trim_end(), @r"
    [0] 00:00 - 00:02  Hi
    [1] 00:02 - 00:05  Bye / for now
    [2] 01:05 - 01:09  Later
    ");
}

#[test]
fn cues_prints_backend_response() {
    let (stdout, _stderr, exit_code) = run_subplay(&["cues", &fixture("talk.json")]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r"
    [0] 00:00 - 00:02  Hi
    [1] 00:02 - 00:05  Bye
    [2] 00:30 - 00:33  Questions?
    ");
}

#[test]
fn cues_sorts_unsorted_transcripts() {
    subplay()
        .args(["cues", &fixture("unsorted.json")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[a] 00:00 - 00:02  first\n[b] "));
}

#[test]
fn cues_rejects_malformed_transcript() {
    subplay()
        .args(["cues", &fixture("invalid.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid session"));
}

#[test]
fn cues_reports_missing_file() {
    subplay()
        .args(["cues", "/nonexistent/talk.srt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read /nonexistent/talk.srt"));
}

#[test]
fn cues_on_empty_transcript_says_so() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quiet.json");
    std::fs::write(&path, r#"{"title": "Quiet", "audio_url": "a.m4a", "subtitles": []}"#).unwrap();

    subplay()
        .args(["cues", &path.to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No subtitles in"));
}

// ============================================================================
// open / play
// ============================================================================

#[test]
fn open_srt_requires_audio() {
    let (_dir, config) = temp_config();
    subplay()
        .args(["--config", &config.to_string_lossy()])
        .args(["open", &fixture("talk.srt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--audio"));
}

#[test]
fn open_needs_a_terminal() {
    let (_dir, config) = temp_config();
    subplay()
        .args(["--config", &config.to_string_lossy()])
        .args(["open", &fixture("talk.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn play_needs_a_terminal() {
    let (_dir, config) = temp_config();
    subplay()
        .args(["--config", &config.to_string_lossy()])
        .args(["play", "https://video.example/watch?v=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn logs_go_to_configured_file() {
    let (dir, config) = temp_config();
    subplay()
        .args(["--config", &config.to_string_lossy(), "--log-level", "debug"])
        .args(["open", &fixture("talk.json")])
        .assert()
        .failure();

    let log = std::fs::read_to_string(dir.path().join("subplay.log")).unwrap();
    assert!(log.contains("logging initialized"));
    assert!(log.contains("opened session file"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_path_honors_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    subplay()
        .args(["--config", &path.to_string_lossy(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("subplay").join("config.toml");
    let path_arg = path.to_string_lossy().into_owned();

    subplay()
        .args(["--config", &path_arg, "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(path.exists());

    subplay()
        .args(["--config", &path_arg, "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    subplay()
        .args(["--config", &path_arg, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("url = \"http://localhost:5000\""))
        .stdout(predicate::str::contains("seek_step_secs = 5.0"));
}

#[test]
fn config_show_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[player\n").unwrap();

    subplay()
        .args(["--config", &path.to_string_lossy(), "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
