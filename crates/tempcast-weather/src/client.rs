//! HTTP client for the forecast dataset.

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::instrument;

use tempcast_core::{ApiConfig, ApiCredential, FetchError};

const AUTH_PARAM: &str = "Authorization";
const FORMAT_PARAM: &str = "format";
const FORMAT: &str = "JSON";

/// Issues exactly one GET per `fetch()`; no retry, no caching.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    credential: ApiCredential,
    url: String,
}

impl ForecastClient {
    pub fn new(credential: ApiCredential, config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            credential,
            url: config.url.clone(),
        })
    }

    /// Fetch the forecast document.
    ///
    /// Returns the decoded body unmodified on HTTP 200. Any other status is
    /// `FetchError::Status`.
    #[instrument(skip(self), fields(url = %self.url), level = "info")]
    pub async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[(AUTH_PARAM, self.credential.expose()), (FORMAT_PARAM, FORMAT)])
            .send()
            .await?;

        let url = redacted(response.url());
        tracing::info!("Request URL: {}", url);

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Forecast request failed with HTTP {}", status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        // The timeout also covers reading the body.
        Ok(response.json::<Value>().await?)
    }
}

/// Render a request URL with the credential masked.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == AUTH_PARAM {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    if !pairs.is_empty() {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    url.to_string()
}
