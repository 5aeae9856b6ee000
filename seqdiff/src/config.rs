//! Configuration for seqdiff consumers.
//!
//! Settings are layered with the `config` crate: built-in defaults first,
//! then any caller-supplied source, then `SEQDIFF__*` environment variables
//! (for example `SEQDIFF__DIRECTION__LIMIT=50`).

use config::{Config, Environment, Source};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

const ENV_PREFIX: &str = "SEQDIFF";
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Direction detector settings.
    #[serde(default)]
    pub direction: DirectionSettings,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Settings for [`crate::DirectionDetector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSettings {
    /// Stop after the record that takes the count past this limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Settings for [`crate::init_logging_from`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter level when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Settings {
    /// Loads settings from defaults and `SEQDIFF__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built, deserialized or
    /// validated.
    pub fn new() -> Result<Self, SettingsError> {
        Self::build(None::<Environment>)
    }

    /// Loads settings from defaults, `source`, and the environment, in that
    /// order of precedence (later wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built, deserialized or
    /// validated.
    pub fn with_source<S>(source: S) -> Result<Self, SettingsError>
    where
        S: Source + Send + Sync + 'static,
    {
        Self::build(Some(source))
    }

    fn build<S>(source: Option<S>) -> Result<Self, SettingsError>
    where
        S: Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder().set_default("logging.level", default_log_level())?;
        if let Some(source) = source {
            builder = builder.add_source(source);
        }
        let settings: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for an unknown log level.
    pub fn validate(&self) -> Result<&Self, SettingsError> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SettingsError::Invalid {
                key: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.direction.limit, None);
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_source_overrides_defaults() {
        let source = File::from_str(
            r#"{"direction": {"limit": 25}, "logging": {"level": "debug"}}"#,
            FileFormat::Json,
        );
        let settings = Settings::with_source(source).unwrap();
        assert_eq!(settings.direction.limit, Some(25));
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let source = File::from_str(r#"{"direction": {"limit": 3}}"#, FileFormat::Json);
        let settings = Settings::with_source(source).unwrap();
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let source = File::from_str(r#"{"logging": {"level": "loud"}}"#, FileFormat::Json);
        let err = Settings::with_source(source).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { ref key, .. } if key == "logging.level"));
    }

    #[test]
    fn test_rejects_wrong_types() {
        let source = File::from_str(r#"{"direction": {"limit": "many"}}"#, FileFormat::Json);
        assert!(matches!(
            Settings::with_source(source),
            Err(SettingsError::Load(_))
        ));
    }
}
