#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary homes live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data root with instant confirmation and plain output.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_dir = base.join("config");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.json"),
        r#"{"confirmation_delay_ms":0,"ui_color_enabled":false}"#,
    )
    .expect("write test config");
    base
}

/// Runs the CLI in script mode against `home`, feeding `input` on stdin.
pub fn run_script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("homeclean_cli")
        .expect("binary built")
        .env("HOMECLEAN_CLI_SCRIPT", "1")
        .env("HOMECLEAN_HOME", home)
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

/// Saved bookings as raw JSON, or an empty list when nothing was written.
pub fn stored_bookings(home: &Path) -> Vec<serde_json::Value> {
    let path = home.join("store").join("bookings.json");
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).expect("bookings file is a JSON array"),
        Err(_) => Vec::new(),
    }
}
