use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub logging: LoggingSettings,
    pub output: OutputSettings,
}

impl Config {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.window_months == 0 {
            return Err(ConfigError::ValidationError(
                "engine.window_months must be at least 1".to_string(),
            ));
        }
        if self.engine.max_window_months == 0 {
            return Err(ConfigError::ValidationError(
                "engine.max_window_months must be at least 1".to_string(),
            ));
        }
        if self.engine.window_months > self.engine.max_window_months {
            return Err(ConfigError::ValidationError(format!(
                "engine.window_months ({}) exceeds engine.max_window_months ({})",
                self.engine.window_months, self.engine.max_window_months
            )));
        }
        Ok(())
    }
}

/// Parameters for the emission engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// The analysis window used when a request does not name one, in months.
    pub window_months: usize,
    /// Hard cap on any requested window, in months.
    pub max_window_months: usize,
}

impl EngineSettings {
    /// Resolves a requested window against the default and the cap.
    pub fn resolve_window(&self, requested: Option<usize>) -> usize {
        let window = requested.unwrap_or(self.window_months);
        if window > self.max_window_months {
            tracing::warn!(
                requested = window,
                max = self.max_window_months,
                "Requested window exceeds the configured maximum; clamping."
            );
        }
        window.min(self.max_window_months)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_months: 60,
            max_window_months: 60,
        }
    }
}

/// Logging setup for the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set (e.g. "info", "tokenflow=debug").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
