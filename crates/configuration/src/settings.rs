use crate::error::ConfigError;
use core_types::StdDevKind;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub metrics: MetricsConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Connection settings for the market data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// The provider's base URL, without the `/query` path.
    pub base_url: String,
    /// The provider API key. Usually supplied through `STOCKSCOPE__PROVIDER__API_KEY`.
    pub api_key: String,
    /// Upper bound on a single HTTP request.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub user_agent: String,
}

/// Parameters for the metrics engine.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// The standard deviation estimator used for volatility.
    pub std_dev: StdDevKind,
    /// Number of buckets in the daily return histogram.
    pub histogram_bins: usize,
    /// Length of the fetched history window, in calendar years.
    pub history_years: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

/// Verbosity of the default log filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.base_url must not be empty".to_string(),
            ));
        }
        if self.provider.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "provider.timeout must be greater than zero".to_string(),
            ));
        }
        if self.metrics.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "metrics.histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.metrics.history_years == 0 {
            return Err(ConfigError::ValidationError(
                "metrics.history_years must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
