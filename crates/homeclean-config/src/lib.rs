//! homeclean-config
//!
//! Persistent user preferences for the booking CLI.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AccessibilitySettings, Config, CONFIG_KEYS};
