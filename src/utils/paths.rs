use std::{env, path::PathBuf};

use homeclean_config::Config;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "HOMECLEAN_HOME";

/// Returns the application data directory, defaulting to `~/.homeclean`.
pub fn app_data_dir() -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => Config::default_data_root(),
    }
}

/// Line history for the interactive shell.
pub fn history_file() -> PathBuf {
    app_data_dir().join("history.txt")
}
