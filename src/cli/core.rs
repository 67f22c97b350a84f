//! Shell dispatch, error reporting, and shared context helpers.

use std::{io, path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use homeclean_config::{Config, ConfigError, ConfigManager, CONFIG_KEYS};
use homeclean_core::{
    AddressBook, BookingRepository, CatalogService, ConfirmationSimulator, CoreError,
    KeyValueStore,
};
use homeclean_domain::{CategoryCatalog, Route};
use homeclean_storage_json::JsonFileStore;
use strsim::levenshtein;
use thiserror::Error;
use tracing::{info, warn};

pub use crate::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ScriptInput, ShellContext};
use super::system_clock::SystemClock;
use crate::utils::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Recoverable command failure; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Config(inner) => CommandError::Config(inner),
            CliError::Io(inner) => CommandError::Io(inner),
            CliError::Prompt(inner) => CommandError::Dialoguer(inner),
            CliError::Readline(message) | CliError::Input(message) => {
                CommandError::Message(message)
            }
        }
    }
}

impl ShellContext {
    /// Opens the shell against `HOMECLEAN_HOME` (or `~/.homeclean`).
    pub fn new(mode: CliMode, script: ScriptInput) -> Result<Self, CliError> {
        Self::open(mode, paths::app_data_dir(), script)
    }

    pub fn open(mode: CliMode, data_root: PathBuf, script: ScriptInput) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(&data_root)?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %config_manager.config_path().display(), error = %err, "config unreadable, using defaults");
                cli_io::print_warning(format!(
                    "Configuration could not be read ({err}); using defaults."
                ));
                Config::default()
            }
        };
        cli_io::apply_config(&config);

        let store_root = config.resolve_store_root(&data_root);
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&store_root)?);
        info!(data_root = %data_root.display(), store = %store_root.display(), "shell context ready");

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            data_root,
            store,
            clock: Arc::new(SystemClock),
            script,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "homeclean> ".to_string()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn bookings(&self) -> BookingRepository {
        BookingRepository::new(self.store.clone())
    }

    pub(crate) fn address_book(&self) -> AddressBook {
        AddressBook::new(self.store.clone())
    }

    pub(crate) fn simulator(&self) -> ConfirmationSimulator {
        ConfirmationSimulator::new(self.config.confirmation_delay())
    }

    /// Resolves `book` arguments (`regular` or `/service/regular`) to a catalog.
    pub(crate) fn resolve_catalog(&self, target: &str) -> Result<CategoryCatalog, CommandError> {
        let key = if target.starts_with('/') {
            match Route::parse(target) {
                Some(Route::Service(key)) => key,
                _ => {
                    return Err(CommandError::InvalidArguments(format!(
                        "`{target}` is not a service path; use /service/<category>"
                    )))
                }
            }
        } else {
            target.to_string()
        };
        Ok(CatalogService::resolve(&key, self.config.unknown_category)?)
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set_value(key, value)?;
        self.config_manager.save(&updated)?;
        self.config = updated;
        cli_io::apply_config(&self.config);
        info!(key, "configuration updated");
        cli_io::print_success(format!(
            "Configuration updated: {} = {}",
            key.to_ascii_lowercase(),
            self.config.get_value(key)?
        ));
        if key.eq_ignore_ascii_case("default_store_root") {
            cli_io::print_hint("Restart the shell to use the new store location.");
        }
        Ok(())
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        output::section("Configuration");
        let mut rows = Vec::with_capacity(CONFIG_KEYS.len() + 1);
        for key in CONFIG_KEYS {
            rows.push((key.to_string(), self.config.get_value(key)?));
        }
        rows.push((
            "config file".to_string(),
            self.config_manager.config_path().display().to_string(),
        ));
        output::two_column(&rows);
        Ok(())
    }

    /// Runs the command named `raw`; the registry matches it case-insensitively.
    pub(crate) fn dispatch(
        &mut self,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(raw) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit HomeClean?", true)
            .map_err(|err| CliError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(CoreError::UnknownCategory(key)) => {
                cli_io::print_error(format!("Unknown service category `{key}`."));
                cli_io::print_hint("Use `categories` to list bookable services.");
                Ok(())
            }
            CommandError::Config(ConfigError::UnknownKey(key)) => {
                cli_io::print_error(format!("Unknown config key `{key}`."));
                cli_io::print_hint(format!("Known keys: {}", CONFIG_KEYS.join(", ")));
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script_context(dir: &TempDir) -> ShellContext {
        ShellContext::open(
            CliMode::Script,
            dir.path().to_path_buf(),
            ScriptInput::default(),
        )
        .expect("open context")
    }

    #[test]
    fn service_paths_resolve_like_keys() {
        let dir = TempDir::new().unwrap();
        let context = script_context(&dir);
        let by_path = context.resolve_catalog("/service/kitchen").unwrap();
        let by_key = context.resolve_catalog("kitchen").unwrap();
        assert_eq!(by_path, by_key);
        assert!(matches!(
            context.resolve_catalog("/bookings"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn rejected_config_value_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let mut context = script_context(&dir);
        assert!(context
            .set_config_value("confirmation_delay_ms", "later")
            .is_err());
        assert!(!context.config_manager.config_path().exists());

        context.set_config_value("confirmation_delay_ms", "0").unwrap();
        let reloaded = context.config_manager.load().unwrap();
        assert_eq!(reloaded.confirmation_delay_ms, 0);
        assert_eq!(context.simulator().delay(), std::time::Duration::ZERO);
    }

    #[test]
    fn exit_command_stops_the_loop() {
        let dir = TempDir::new().unwrap();
        let mut context = script_context(&dir);
        assert_eq!(
            context.dispatch("EXIT", &[]).unwrap(),
            LoopControl::Exit
        );
        assert_eq!(
            context.dispatch("bokings", &[]).unwrap(),
            LoopControl::Continue
        );
    }
}
