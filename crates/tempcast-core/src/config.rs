use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the CWA open-data authorization token
pub const CREDENTIAL_ENV: &str = "CWA_TOKEN";

pub const DEFAULT_API_URL: &str =
    "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi/F-A0010-001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DATABASE_PATH: &str = "data.db";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Authorization token for the forecast API.
///
/// Never written to the config file and never printed: `Debug` redacts it.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wrap a token, rejecting empty or whitespace-only values.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingSetting(CREDENTIAL_ENV.to_string()));
        }
        Ok(Self(token))
    }

    /// Read the token from `CWA_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(CREDENTIAL_ENV)
            .map_err(|_| ConfigError::MissingSetting(CREDENTIAL_ENV.to_string()))?;
        Self::new(token)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

/// How daily maximum and minimum entries are matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// i-th maximum with i-th minimum; extras in the longer list are dropped
    #[default]
    Positional,
    /// Join on each entry's own `dataDate`; unmatched maximum entries are skipped
    ByDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Forecast dataset endpoint
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file, relative paths resolve against the working directory
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub pairing: PairingMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Config {
    /// Load configuration from the user config directory, creating a default
    /// file if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating a default file if
    /// it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.url, "api.url", &mut result);

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "Timeout must be greater than 0");
        } else if self.api.timeout_secs > 300 {
            result.add_warning(
                "api.timeout_secs",
                "Timeout is unusually long (more than 5 minutes)",
            );
        }

        if self.store.database_path.as_os_str().is_empty() {
            result.add_error("store.database_path", "Database path cannot be empty");
        } else if self.store.database_path.is_dir() {
            result.add_error(
                "store.database_path",
                format!(
                    "Path is a directory: {}",
                    self.store.database_path.display()
                ),
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.query().is_some() {
                    result.add_warning(
                        field_name,
                        "Query string is replaced by the Authorization and format parameters",
                    );
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the given path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("user config directory".to_string()))?
            .join("tempcast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.api.url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.api.url = "ftp://opendata.cwa.gov.tw/F-A0010-001".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_url_with_query_is_warning() {
        let mut config = Config::default();
        config.api.url = format!("{}?format=XML", DEFAULT_API_URL);
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "api.url"));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.timeout_secs"));
    }

    #[test]
    fn test_long_timeout_is_warning() {
        let mut config = Config::default();
        config.api.timeout_secs = 600;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "api.timeout_secs"));
    }

    #[test]
    fn test_database_path_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.database_path = dir.path().to_path_buf();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "store.database_path"));
    }

    #[test]
    fn test_load_from_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.ingest.pairing, PairingMode::Positional);
    }

    #[test]
    fn test_load_from_round_trips_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.ingest.pairing = PairingMode::ByDate;
        config.store.database_path = PathBuf::from("/var/lib/tempcast/data.db");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ingest.pairing, PairingMode::ByDate);
        assert_eq!(loaded.store.database_path, PathBuf::from("/var/lib/tempcast/data.db"));
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ingest]\npairing = \"by_date\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ingest.pairing, PairingMode::ByDate);
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.store.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nurl = ").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_empty_credential_rejected() {
        assert!(matches!(
            ApiCredential::new(""),
            Err(ConfigError::MissingSetting(ref name)) if name == CREDENTIAL_ENV
        ));
        assert!(ApiCredential::new("   ").is_err());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = ApiCredential::new("CWA-SECRET-TOKEN").unwrap();
        assert_eq!(credential.expose(), "CWA-SECRET-TOKEN");
        assert!(!format!("{:?}", credential).contains("SECRET"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
