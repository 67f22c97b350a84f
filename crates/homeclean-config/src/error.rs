use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("unknown config key `{0}`")]
    UnknownKey(String),

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
}
