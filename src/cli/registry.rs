use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One shell command: its name, help text, and handler.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands kept in registration order. Lookups ignore case.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`; a later entry with the same name replaces the earlier one in place.
    pub fn register(&mut self, entry: CommandEntry) {
        let key = entry.name.to_ascii_lowercase();
        match self.by_name.get(&key) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.by_name.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.by_name
            .get(&name.trim().to_ascii_lowercase())
            .and_then(|&slot| self.entries.get(slot))
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn other(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn lookups_ignore_case() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("bookings", "List", "bookings", noop));
        assert_eq!(registry.get("BOOKINGS").map(|entry| entry.name), Some("bookings"));
        assert!(registry.handler("Bookings").is_some());
        assert!(registry.get("booking").is_none());
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("book", "Book", "book", noop));
        registry.register(CommandEntry::new("help", "Help", "help", noop));
        registry.register(CommandEntry::new("Book", "Book again", "book", other));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Book", "help"]);
        assert_eq!(
            registry.get("book").map(|entry| entry.description),
            Some("Book again")
        );
    }
}
