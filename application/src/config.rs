//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog configuration.
    pub catalog: Catalog,

    /// Search configuration.
    pub search: Search,

    /// Output configuration.
    pub output: Output,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Catalog configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Path to a JSON catalog replacing the built-in one.
    pub path: Option<String>,
}

/// Search configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Search {
    /// Indicator whether invalid search parameters are rejected instead of
    /// being ignored.
    pub strict: bool,
}

impl From<Search> for service::Config {
    fn from(value: Search) -> Self {
        let Search { strict } = value;
        Self {
            strict_params: strict,
        }
    }
}

/// Output configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Output {
    /// Indicator whether JSON output is pretty-printed.
    #[default(true)]
    pub pretty: bool,

    /// Indicator whether options of select filters are listed along with
    /// the filters.
    #[default(false)]
    pub options: bool,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Config, LogLevel};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("/nonexistent/config").unwrap();

        assert!(config.catalog.path.is_none());
        assert!(!config.search.strict);
        assert!(config.output.pretty);
        assert!(!config.output.options);
        assert!(matches!(config.log.level, LogLevel::Info));
        assert!(!service::Config::from(config.search).strict_params);
    }
}
