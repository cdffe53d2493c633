pub mod config;
pub mod error;
pub mod record;

pub use config::{
    ApiConfig, ApiCredential, Config, IngestConfig, PairingMode, StoreConfig, ValidationResult,
    CREDENTIAL_ENV,
};
pub use error::{ConfigError, FetchError, IngestError, ParseError, StoreError};
pub use record::{ForecastRecord, RegionSummary, StoredForecast, DATE_FORMAT};

use anyhow::Result;

/// Initialize logging for the tempcast binaries
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::debug!("tempcast core initialized");
    Ok(())
}
