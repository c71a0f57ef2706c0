//! Configuration loading
//!
//! `defaults/handhistory.default.toml` is embedded into the crate so documented defaults and
//! runtime behavior stay in sync. Callers layer their own files on top via [`Loader`] before
//! deserializing into [`HandHistoryConfig`].

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/handhistory.default.toml");

/// Top-level configuration consumed by parsers and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HandHistoryConfig {
    pub parser: ParserConfig,
    pub settlement: SettlementConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParserConfig {
    /// Used when the table line has no `N-max`
    pub default_max_seats: u8,
    /// Used when the table line names no button seat
    pub default_button_seat: u8,
    /// Fail hands whose collections disagree with the computed pots
    pub reconcile_pots: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SettlementConfig {
    /// Largest difference at which two amounts are still equal
    pub tolerance: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_max_seats: 9,
            default_button_seat: 1,
            reconcile_pots: true,
        }
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

/// Builds a [`HandHistoryConfig`] from the embedded defaults plus any files and overrides
/// layered on top. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML file that must exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Override one dotted key, e.g. `parser.reconcile_pots`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<HandHistoryConfig, ConfigError> {
        let merged = self.builder.build()?;
        merged.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top
pub fn load_defaults() -> Result<HandHistoryConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_default_impl() {
        let config = load_defaults().unwrap();
        assert_eq!(config, HandHistoryConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.reconcile_pots", false)
            .and_then(|l| l.set_override("parser.default_max_seats", 6_i64))
            .unwrap()
            .build()
            .unwrap();
        assert!(!config.parser.reconcile_pots);
        assert_eq!(config.parser.default_max_seats, 6);
        assert_eq!(config.settlement.tolerance, 0.01);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/handhistory.toml")
            .build()
            .expect("missing optional file is ignored");
        assert_eq!(config.parser.default_button_seat, 1);
    }

    #[test]
    fn required_file_must_exist() {
        assert!(Loader::new()
            .with_file("/nonexistent/handhistory.toml")
            .build()
            .is_err());
    }
}
