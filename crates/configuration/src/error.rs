use thiserror::Error;

/// Failures while assembling the tokenflow configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `TOKENFLOW_*` variable could not be read or deserialized.
    #[error("Failed to read tokenflow settings: {0}")]
    LoadError(#[from] config::ConfigError),

    /// The settings parsed but break a cross-field rule (e.g. the window cap).
    #[error("Invalid tokenflow settings: {0}")]
    ValidationError(String),
}
