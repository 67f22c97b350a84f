use std::{path::PathBuf, time::Duration};

use homeclean_domain::UnknownCategoryPolicy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Keys accepted by [`Config::set_value`], in display order.
pub const CONFIG_KEYS: [&str; 8] = [
    "locale",
    "currency",
    "ui_color_enabled",
    "accessibility.plain_output",
    "accessibility.high_contrast",
    "unknown_category",
    "confirmation_delay_ms",
    "default_store_root",
];

/// User-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
    /// What `book <category>` does with a category it does not recognise.
    #[serde(default)]
    pub unknown_category: UnknownCategoryPolicy,
    #[serde(default = "Config::default_confirmation_delay_ms")]
    pub confirmation_delay_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    /// Optional directory for stored bookings and addresses. Defaults to `<data root>/store`.
    pub default_store_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            accessibility: AccessibilitySettings::default(),
            unknown_category: UnknownCategoryPolicy::default(),
            confirmation_delay_ms: Self::default_confirmation_delay_ms(),
            default_store_root: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-IN".into()
    }

    pub fn default_currency() -> String {
        "INR".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_confirmation_delay_ms() -> u64 {
        2000
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }

    /// Directory holding the key-value documents.
    pub fn resolve_store_root(&self, data_root: &std::path::Path) -> PathBuf {
        match &self.default_store_root {
            Some(path) => path.clone(),
            None => data_root.join("store"),
        }
    }

    /// Data root used when no override is given: `~/.homeclean`.
    pub fn default_data_root() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".homeclean")
    }

    /// Current value of `key` rendered for display.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key.trim().to_ascii_lowercase().as_str() {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "ui_color_enabled" => on_off(self.ui_color_enabled),
            "accessibility.plain_output" => on_off(self.accessibility.plain_output),
            "accessibility.high_contrast" => on_off(self.accessibility.high_contrast),
            "unknown_category" => self.unknown_category.to_string(),
            "confirmation_delay_ms" => self.confirmation_delay_ms.to_string(),
            "default_store_root" => self
                .default_store_root
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses `value` and assigns it to `key`; the config is unchanged on error.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        match key.as_str() {
            "locale" => self.locale = non_empty(&key, value)?,
            "currency" => self.currency = non_empty(&key, value)?.to_ascii_uppercase(),
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(&key, value)?,
            "accessibility.plain_output" => {
                self.accessibility.plain_output = parse_flag(&key, value)?
            }
            "accessibility.high_contrast" => {
                self.accessibility.high_contrast = parse_flag(&key, value)?
            }
            "unknown_category" => {
                self.unknown_category =
                    UnknownCategoryPolicy::parse(value).ok_or_else(|| ConfigError::InvalidValue {
                        key: key.clone(),
                        reason: "expected `fallback` or `reject`".into(),
                    })?
            }
            "confirmation_delay_ms" => {
                self.confirmation_delay_ms =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.clone(),
                        reason: "expected a whole number of milliseconds".into(),
                    })?
            }
            "default_store_root" => {
                self.default_store_root = if value.is_empty() || value.eq_ignore_ascii_case("none")
                {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default)]
    pub high_contrast: bool,
}

fn on_off(flag: bool) -> String {
    let label = if flag { "on" } else { "off" };
    label.to_string()
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "value must not be empty".into(),
        });
    }
    Ok(value.to_string())
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "expected on/off".into(),
        }),
    }
}
