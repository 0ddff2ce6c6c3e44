use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, EngineSettings, LoggingSettings, OutputFormat, OutputSettings};

/// The file read when no explicit path is given. It may be absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `TOKENFLOW_ENGINE__WINDOW_MONTHS=36`.
pub const ENV_PREFIX: &str = "TOKENFLOW";

/// Loads the application configuration.
///
/// Reads `path` (which must then exist) or the optional `config.toml`, layers
/// `TOKENFLOW_*` environment variables on top, deserializes everything into our
/// strongly-typed `Config` struct, and validates it.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    let builder = config::Config::builder()
        .add_source(config::File::from(file).required(path.is_some()))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_values_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokenflow.toml");
        fs::write(
            &path,
            r#"
[engine]
window_months = 36
max_window_months = 48

[logging]
level = "debug"
directory = "logs"

[output]
format = "json"
"#,
        )
        .unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.engine.window_months, 36);
        assert_eq!(config.engine.max_window_months, 48);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.directory.as_deref(), Some(Path::new("logs")));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "[engine]\nwindow_months = 24\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.engine.window_months, 24);
        assert_eq!(config.engine.max_window_months, 60);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn window_above_cap_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[engine]\nwindow_months = 72\nmax_window_months = 60\n").unwrap();

        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert_eq!(
            err.to_string(),
            "Invalid tokenflow settings: engine.window_months (72) exceeds engine.max_window_months (60)"
        );
    }

    #[test]
    fn resolve_window_applies_default_and_cap() {
        let engine = EngineSettings {
            window_months: 24,
            max_window_months: 36,
        };
        assert_eq!(engine.resolve_window(None), 24);
        assert_eq!(engine.resolve_window(Some(12)), 12);
        assert_eq!(engine.resolve_window(Some(120)), 36);
    }
}
