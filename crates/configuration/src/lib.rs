use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, LogLevel, LoggingConfig, MetricsConfig, ProviderConfig, ServerConfig};

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Built-in values, so the application runs with no config file at all.
const DEFAULTS: &str = r#"
[provider]
base_url = "https://www.alphavantage.co"
api_key = "demo"
timeout = "15s"
user_agent = "stockscope/0.1"

[metrics]
std_dev = "sample"
histogram_bins = 50
history_years = 5

[server]
addr = "127.0.0.1:3000"

[logging]
level = "info"
"#;

/// Loads the application configuration.
///
/// Sources are layered in order of increasing precedence: built-in defaults,
/// the TOML file at `path` (or an optional `config.toml`), and environment
/// variables prefixed with `STOCKSCOPE__`, e.g. `STOCKSCOPE__PROVIDER__API_KEY`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
        .add_source(file)
        .add_source(
            Environment::with_prefix("STOCKSCOPE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// Builds a configuration from the defaults overlaid with a TOML document.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::StdDevKind;
    use std::time::Duration;

    #[test]
    fn defaults_are_complete() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.provider.base_url, "https://www.alphavantage.co");
        assert_eq!(config.provider.timeout, Duration::from_secs(15));
        assert_eq!(config.metrics.std_dev, StdDevKind::Sample);
        assert_eq!(config.metrics.histogram_bins, 50);
        assert_eq!(config.metrics.history_years, 5);
        assert_eq!(config.server.addr.port(), 3000);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = load_config_from_str(
            r#"
            [provider]
            api_key = "secret"
            timeout = "2s"

            [metrics]
            std_dev = "population"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.api_key, "secret");
        assert_eq!(config.provider.timeout, Duration::from_secs(2));
        assert_eq!(config.metrics.std_dev, StdDevKind::Population);
        assert_eq!(config.metrics.histogram_bins, 50);
    }

    #[test]
    fn zero_bins_fail_validation() {
        let err = load_config_from_str("[metrics]\nhistogram_bins = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("definitely-missing-stockscope.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
