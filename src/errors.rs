use homeclean_config::ConfigError;
use homeclean_core::CoreError;
use thiserror::Error;

/// Fatal errors that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(String),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Readline(err.to_string())
    }
}
