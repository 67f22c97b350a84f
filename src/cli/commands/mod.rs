pub mod booking;
pub mod catalog;
pub mod config;
pub mod profile;
pub mod support;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "book",
    "bookings",
    "categories",
    "catalog",
    "addresses",
    "payments",
    "support",
    "config",
    "version",
    "help",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(booking::definitions());
    commands.extend(catalog::definitions());
    commands.extend(profile::definitions());
    commands.extend(support::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_follows_menu_order() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ROOT_COMMAND_ORDER);
    }
}
