//! Layered application settings
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults (see [`crate::constants`])
//! 2. Optional config file (YAML or TOML, picked by extension)
//! 3. Environment overrides, `FLATFINDER__SECTION__KEY=value`

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::ConfigError;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by RUST_LOG
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: constants::logging::DEFAULT_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningSettings {
    pub dataset_id: String,
    pub page_limit: usize,
    pub fallback_to_previous_month: bool,
    pub default_tenure_years: f64,
}

impl Default for ScreeningSettings {
    fn default() -> Self {
        Self {
            dataset_id: constants::screening::RESALE_DATASET_ID.to_string(),
            page_limit: constants::screening::PAGE_LIMIT,
            fallback_to_previous_month: constants::screening::FALLBACK_TO_PREVIOUS_MONTH,
            default_tenure_years: constants::screening::DEFAULT_TENURE_YEARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub screening: ScreeningSettings,
}

impl Settings {
    /// Load settings from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_prefix(path, constants::env::PREFIX)
    }

    pub(crate) fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator(constants::env::SEPARATOR)
                .separator(constants::env::SEPARATOR)
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        tracing::debug!(
            file = ?path,
            page_limit = settings.screening.page_limit,
            fallback = settings.screening.fallback_to_previous_month,
            "Loaded settings"
        );

        Ok(settings)
    }

    /// Reject values the screener cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let screening = &self.screening;

        if screening.dataset_id.trim().is_empty() {
            return Err(ConfigError::Invalid("screening.dataset_id is empty".into()));
        }
        if screening.page_limit == 0 {
            return Err(ConfigError::Invalid("screening.page_limit must be positive".into()));
        }
        let tenure = screening.default_tenure_years;
        if !(tenure > 0.0 && tenure <= constants::screening::MAX_TENURE_YEARS) {
            return Err(ConfigError::Invalid(format!(
                "screening.default_tenure_years must be in (0, {}], got {}",
                constants::screening::MAX_TENURE_YEARS,
                tenure
            )));
        }

        Ok(())
    }
}
