//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Directory holding the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Path of a fixture file as a string argument.
pub fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

/// Temp directory with a config file that keeps logs inside it.
pub fn temp_config() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    let log = dir.path().join("subplay.log");
    std::fs::write(
        &path,
        format!(
            "[backend]\nurl = \"http://127.0.0.1:9\"\n\n[logging]\nfile = {:?}\n",
            log.to_string_lossy()
        ),
    )
    .expect("Failed to write config");
    (dir, path)
}

/// Run the subplay binary without colors and capture its output.
pub fn run_subplay(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_subplay"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute subplay");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
