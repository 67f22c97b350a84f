//! Shared runtime state for CLI interactions and command execution.

use std::{
    collections::VecDeque,
    io::{self, BufRead},
    path::PathBuf,
    sync::Arc,
};

use dialoguer::theme::ColorfulTheme;
use homeclean_config::{Config, ConfigManager};
use homeclean_core::{Clock, KeyValueStore};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Pending stdin lines in script mode, shared by the shell and the booking wizard.
#[derive(Debug, Default)]
pub struct ScriptInput {
    lines: VecDeque<String>,
}

impl ScriptInput {
    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let lines = reader.lines().collect::<io::Result<VecDeque<_>>>()?;
        Ok(Self { lines })
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub data_root: PathBuf,
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub script: ScriptInput,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, data_root: {} }}",
            self.running,
            self.last_command,
            self.data_root.display()
        )
    }
}
