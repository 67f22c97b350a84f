use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    pub plain_output: bool,
    pub high_contrast: bool,
    pub color_enabled: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            plain_output: false,
            high_contrast: false,
            color_enabled: true,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    if !prefs.color_enabled || prefs.plain_output {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info | MessageKind::Section => ("", ""),
        MessageKind::Success => ("OK:", "✔"),
        MessageKind::Warning => ("WARNING:", "⚠"),
        MessageKind::Error => ("ERROR:", "✖"),
        MessageKind::Hint => ("HINT:", "›"),
    }
}

pub fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();
    if kind == MessageKind::Section {
        let header = format!("=== {} ===", text.trim());
        return if prefs.plain_output {
            header
        } else {
            header.bold().to_string()
        };
    }

    let (plain_label, icon) = build_label(kind);
    if icon.is_empty() {
        return text;
    }
    if prefs.plain_output {
        return format!("{plain_label} {text}");
    }

    let base = format!("{icon} {text}");
    if prefs.high_contrast {
        return base.bold().to_string();
    }
    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Hint => base.bright_cyan().to_string(),
        MessageKind::Info | MessageKind::Section => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    let formatted = format_message(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints aligned `label  value` rows.
pub fn two_column<L: AsRef<str>, V: AsRef<str>>(rows: &[(L, V)]) {
    let width = rows
        .iter()
        .map(|(label, _)| label.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in rows {
        println!(
            "  {:<width$}  {}",
            label.as_ref(),
            value.as_ref(),
            width = width
        );
    }
}

/// Renders a whole-rupee amount such as `₹2,499`.
pub fn rupees(amount: u32) -> String {
    format!("₹{}", homeclean_domain::group_thousands(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_uses_text_labels() {
        let prefs = OutputPreferences {
            plain_output: true,
            ..OutputPreferences::default()
        };
        assert_eq!(
            format_message(MessageKind::Warning, "Please select a date", &prefs),
            "WARNING: Please select a date"
        );
        assert_eq!(format_message(MessageKind::Info, "hello", &prefs), "hello");
        assert_eq!(
            format_message(MessageKind::Section, " Bookings ", &prefs),
            "=== Bookings ==="
        );
    }

    #[test]
    fn rupee_amounts_are_grouped() {
        assert_eq!(rupees(299), "₹299");
        assert_eq!(rupees(4499), "₹4,499");
    }
}
