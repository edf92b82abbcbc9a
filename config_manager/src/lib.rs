use chrono::format::{Item, StrftimeItems};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;
use wallet_core::format::{DEFAULT_HEAD_LEN, DEFAULT_TAIL_LEN, DEFAULT_TIMESTAMP_FORMAT};
use wallet_core::NumberFormat;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] ConfigError),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Upper bound for `address_head_len` and `address_tail_len`
pub const MAX_ADDRESS_PART_LEN: usize = 128;

/// Environment variable prefix, e.g. `ORBIT__API__API_BASE_URL`
pub const ENV_PREFIX: &str = "ORBIT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    /// General system settings
    pub system: SystemSettings,

    /// Wallet API configuration
    pub api: ApiConfig,

    /// Presentation settings used by renderers
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemSettings {
    /// Enable debug logging
    pub debug_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Origin plus path prefix; the address is appended as the last segment
    pub api_base_url: String,

    /// Total request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Connection timeout in seconds
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Characters kept at the start of a truncated address
    pub address_head_len: usize,

    /// Characters kept at the end of a truncated address
    pub address_tail_len: usize,

    pub group_separator: String,
    pub decimal_separator: String,

    /// Amounts are rounded to at most this many fraction digits
    pub max_fraction_digits: u32,

    /// chrono strftime pattern for transaction timestamps
    pub timestamp_format: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            system: SystemSettings { debug_mode: false },
            api: ApiConfig {
                api_base_url: "http://127.0.0.1:5000/api/address".to_string(),
                request_timeout_seconds: 30,
                connect_timeout_seconds: 10,
            },
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let number = NumberFormat::default();
        Self {
            address_head_len: DEFAULT_HEAD_LEN,
            address_tail_len: DEFAULT_TAIL_LEN,
            group_separator: number.group_separator,
            decimal_separator: number.decimal_separator,
            max_fraction_digits: number.max_fraction_digits,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "API base URL is required".to_string(),
            ));
        }

        let url = Url::parse(&self.api_base_url).map_err(|e| {
            ConfigurationError::InvalidValue(format!(
                "API base URL '{}' is not a valid URL: {}",
                self.api_base_url, e
            ))
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigurationError::InvalidValue(format!(
                "API base URL '{}' cannot take path segments",
                self.api_base_url
            )));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Connect timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timestamp_format.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "Timestamp format cannot be empty".to_string(),
            ));
        }

        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigurationError::InvalidValue(format!(
                "Timestamp format '{}' is not a valid strftime pattern",
                self.timestamp_format
            )));
        }

        if self.address_head_len > MAX_ADDRESS_PART_LEN || self.address_tail_len > MAX_ADDRESS_PART_LEN {
            return Err(ConfigurationError::InvalidValue(format!(
                "Address head/tail lengths must be at most {}",
                MAX_ADDRESS_PART_LEN
            )));
        }

        if self.decimal_separator.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "Decimal separator cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn number_format(&self) -> NumberFormat {
        NumberFormat {
            group_separator: self.group_separator.clone(),
            decimal_separator: self.decimal_separator.clone(),
            max_fraction_digits: self.max_fraction_digits,
        }
    }
}

impl SystemConfig {
    /// Load configuration from `config.toml` and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config_builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&SystemConfig::default())?);

        if config_path.as_ref().exists() {
            info!(
                "Loading configuration from: {}",
                config_path.as_ref().display()
            );
            config_builder = config_builder.add_source(File::from(config_path.as_ref()));
        } else {
            debug!("Config file not found, using defaults and environment variables");
        }

        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .separator("__"),
        );

        let config = config_builder.build()?;
        let system_config: SystemConfig = config.try_deserialize()?;

        system_config.validate()?;

        Ok(system_config)
    }

    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.display.validate()?;
        Ok(())
    }

    /// Get configuration as a JSON value
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SystemConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display.number_format(), NumberFormat::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = SystemConfig::load_from_path("definitely/not/here.toml").unwrap();
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
api_base_url = "https://explorer.example.org/api/address"
request_timeout_seconds = 5

[display]
address_head_len = 8
timestamp_format = "%Y-%m-%d %H:%M"
"#
        )
        .unwrap();

        let config = SystemConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.api_base_url, "https://explorer.example.org/api/address");
        assert_eq!(config.api.request_timeout_seconds, 5);
        assert_eq!(config.api.connect_timeout_seconds, 10);
        assert_eq!(config.display.address_head_len, 8);
        assert_eq!(config.display.address_tail_len, DEFAULT_TAIL_LEN);
        assert_eq!(config.display.timestamp_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = SystemConfig::default();
        config.api.request_timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = SystemConfig::default();
        config.api.api_base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.api_base_url = "mailto:wallet@example.org".to_string();
        assert!(config.validate().is_err());

        config.api.api_base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_timestamp_format() {
        let mut config = SystemConfig::default();
        config.display.timestamp_format = String::new();
        assert!(config.validate().is_err());

        config.display.timestamp_format = "%Q %".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_address_parts() {
        let mut config = SystemConfig::default();
        config.display.address_head_len = MAX_ADDRESS_PART_LEN;
        assert!(config.validate().is_ok());

        config.display.address_head_len = usize::MAX;
        assert!(config.validate().is_err());

        config.display.address_head_len = 6;
        config.display.address_tail_len = MAX_ADDRESS_PART_LEN + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_json_value() {
        let value = SystemConfig::default().to_json_value();
        assert_eq!(value["api"]["request_timeout_seconds"], 30);
        assert_eq!(value["display"]["address_head_len"], 6);
    }
}
