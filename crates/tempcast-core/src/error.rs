//! Error types for the forecast ingestion pipeline.
//!
//! Every stage of an ingestion cycle has its own error enum:
//! - `ConfigError` before any work starts
//! - `FetchError` for the HTTP call
//! - `ParseError` for reshaping the JSON document
//! - `StoreError` for SQLite
//!
//! `IngestError` wraps all of them. Use `user_message()` for text shown to
//! the operator; the `Display` output keeps full detail for logs.

use thiserror::Error;

/// Top-level error for one ingestion cycle or CLI command.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IngestError {
    /// Returns a short, actionable message for the operator.
    pub fn user_message(&self) -> &'static str {
        match self {
            IngestError::Config(e) => e.user_message(),
            IngestError::Fetch(e) => e.user_message(),
            IngestError::Parse(e) => e.user_message(),
            IngestError::Store(e) => e.user_message(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Configuration file error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "No configuration directory available on this system.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => {
                "CWA_TOKEN is not set. Export it or add it to your environment."
            }
            ConfigError::Io(_) => "Unable to read or write the configuration file.",
        }
    }
}

/// Errors from the forecast HTTP request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Timeout => "The forecast service did not answer in time.",
            FetchError::Connection(_) => "Unable to connect. Check your internet connection.",
            FetchError::Status { status, .. } if *status == 401 || *status == 403 => {
                "The forecast service rejected the credential. Check CWA_TOKEN."
            }
            FetchError::Status { status, .. } if *status >= 500 => {
                "The forecast service is experiencing issues. Try again later."
            }
            FetchError::Status { .. } => "The forecast request failed.",
            FetchError::InvalidResponse(_) => "The forecast service returned an unreadable body.",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the credential in its query string.
        let err = err.without_url();
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::InvalidResponse(err.to_string())
        } else {
            FetchError::Connection(err.to_string())
        }
    }
}

/// Errors while reshaping the forecast document into records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Missing key `{path}` in forecast document")]
    MissingKey { path: String },

    #[error("Expected {expected} at `{path}`")]
    UnexpectedType {
        path: String,
        expected: &'static str,
    },

    #[error("Malformed entry at `{path}`: {message}")]
    Malformed { path: String, message: String },

    #[error("Non-numeric temperature {value:?} for {region} on {date}")]
    InvalidTemperature {
        region: String,
        date: String,
        value: String,
    },

    #[error("Invalid date {value:?} for {region}")]
    InvalidDate { region: String, value: String },
}

impl ParseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ParseError::MissingKey { .. }
            | ParseError::UnexpectedType { .. }
            | ParseError::Malformed { .. } => {
                "Unable to parse the forecast document. The API response format may have changed."
            }
            ParseError::InvalidTemperature { .. } | ParseError::InvalidDate { .. } => {
                "The forecast document contains an unreadable value. Nothing was stored."
            }
        }
    }
}

/// SQLite store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query failed: {0}")]
    Sqlite(#[source] rusqlite::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Data corruption detected: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Sqlite(_) => "A database operation failed. Nothing was changed.",
            StoreError::InvalidRecord(_) => "A forecast record was rejected by the database.",
            StoreError::Corrupt(_) => "The local database may be corrupted. Consider deleting it.",
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                StoreError::Corrupt(err.to_string())
            }
            _ => StoreError::Sqlite(err),
        }
    }
}
