//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and
//! command line flags.

use pricer_risk::parallel::{ParallelConfig, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable for the log level.
pub const ENV_LOG_LEVEL: &str = "OPTCALC_LOG_LEVEL";
/// Environment variable for the default risk-free rate in percent.
pub const ENV_RATE_PCT: &str = "OPTCALC_RATE_PCT";
/// Environment variable for the output format.
pub const ENV_FORMAT: &str = "OPTCALC_FORMAT";
/// Environment variable for the history window in calendar days.
pub const ENV_HISTORY_WINDOW_DAYS: &str = "OPTCALC_HISTORY_WINDOW_DAYS";
/// Environment variable for the batch parallel threshold.
pub const ENV_PARALLEL_THRESHOLD: &str = "OPTCALC_PARALLEL_THRESHOLD";
/// Environment variable for the batch chunk size.
pub const ENV_BATCH_SIZE: &str = "OPTCALC_BATCH_SIZE";

/// Configuration error types
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format name.
    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidOutputFormat(String),

    /// Default rate outside [0, 100] percent.
    #[error("Invalid risk-free rate: {0}%. Must be between 0 and 100")]
    InvalidRate(f64),

    /// History window of zero days.
    #[error("Invalid history window: {0} days. Must be at least 1")]
    InvalidHistoryWindow(u32),

    /// Batch chunk size of zero.
    #[error("Invalid batch size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    /// Config file unreadable or malformed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable not parseable.
    #[error("Environment variable {var} has invalid value '{value}'")]
    EnvError {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every span and event.
    Trace,
    /// Evaluation detail from the pricing crates.
    Debug,
    /// Command progress.
    Info,
    /// Only warnings and errors.
    #[default]
    Warn,
    /// Only errors.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Box-drawn table for terminals.
    #[default]
    Table,
    /// JSON on stdout.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Risk-free rate in percent when `--rate-pct` is not given
    pub risk_free_rate_pct: f64,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub output_format: OutputFormat,
    /// Trailing calendar days of history used for volatility
    pub history_window_days: u32,
    /// Batch size at which evaluation goes parallel
    pub parallel_threshold: usize,
    /// Items per parallel chunk
    pub batch_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            risk_free_rate_pct: 10.0,
            output_format: OutputFormat::Table,
            history_window_days: 365,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError { var, value })
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment variables read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(rate) = lookup(ENV_RATE_PCT) {
            self.risk_free_rate_pct = parse_env(ENV_RATE_PCT, rate)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.output_format = OutputFormat::from_str(&format)?;
        }
        if let Some(window) = lookup(ENV_HISTORY_WINDOW_DAYS) {
            self.history_window_days = parse_env(ENV_HISTORY_WINDOW_DAYS, window)?;
        }
        if let Some(threshold) = lookup(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_env(ENV_PARALLEL_THRESHOLD, threshold)?;
        }
        if let Some(size) = lookup(ENV_BATCH_SIZE) {
            self.batch_size = parse_env(ENV_BATCH_SIZE, size)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(format) = &cli.format {
            self.output_format = OutputFormat::from_str(format)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.risk_free_rate_pct) {
            return Err(ConfigError::InvalidRate(self.risk_free_rate_pct));
        }
        if self.history_window_days == 0 {
            return Err(ConfigError::InvalidHistoryWindow(self.history_window_days));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }

    /// Parallel settings for batch evaluation
    pub fn parallel_config(&self) -> ParallelConfig {
        ParallelConfig::new(self.batch_size, self.parallel_threshold)
    }
}

/// Global flags that feed configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |var| std::env::var(var).ok())
}

/// [`build_config`] with an injectable environment
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
