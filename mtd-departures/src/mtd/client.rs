//! MTD developer API HTTP client.
//!
//! Every method is a `GET {base}/api/{version}/{format}/{method}` with the
//! API key passed as the `key` query parameter.

use std::time::Duration;

use tracing::debug;

use super::error::MtdError;
use super::source::{DepartureQuery, DepartureSource};
use super::types::{DeparturesResponse, StopsResponse};

/// Default base URL for the MTD developer API.
const DEFAULT_BASE_URL: &str = "https://developer.mtd.org";

/// API version the DTOs were written against.
const DEFAULT_VERSION: &str = "v2.2";

/// Response format segment of the URL.
const DEFAULT_FORMAT: &str = "JSON";

/// Configuration for the MTD client.
#[derive(Debug, Clone)]
pub struct MtdConfig {
    /// API key, sent as `?key=`
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// API version path segment
    pub version: String,
    /// Response format path segment
    pub format: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MtdConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API version path segment.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MTD developer API client.
#[derive(Debug, Clone)]
pub struct MtdClient {
    http: reqwest::Client,
    base_url: String,
    version: String,
    format: String,
    api_key: String,
}

impl MtdClient {
    /// Create a new MTD client with the given configuration.
    pub fn new(config: MtdConfig) -> Result<Self, MtdError> {
        if config.api_key.chars().any(char::is_control) {
            return Err(MtdError::InvalidApiKey(
                "API key contains control characters".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            version: config.version,
            format: config.format,
            api_key: config.api_key,
        })
    }

    /// URL of an API method, without the query string.
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/api/{}/{}/{}",
            self.base_url, self.version, self.format, method
        )
    }

    /// Issue a GET for `method` and return the body of a 200 response.
    async fn get_ok(&self, method: &str, params: &[(&str, String)]) -> Result<String, MtdError> {
        let url = self.method_url(method);
        debug!(method, "MTD request");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(MtdError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch upcoming departures for a stop.
    pub async fn get_departures_by_stop(
        &self,
        query: &DepartureQuery,
    ) -> Result<DeparturesResponse, MtdError> {
        let mut params = vec![
            ("stop_id", query.stop_id.as_str().to_string()),
            ("pt", query.pt.to_string()),
        ];
        if let Some(changeset_id) = &query.changeset_id {
            params.push(("changeset_id", changeset_id.clone()));
        }

        let body = self.get_ok("getdeparturesbystop", &params).await?;

        serde_json::from_str(&body).map_err(|e| MtdError::Malformed {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Fetch the full stop listing as raw JSON, for persisting verbatim.
    pub async fn get_stops_raw(&self) -> Result<serde_json::Value, MtdError> {
        let body = self.get_ok("getstops", &[]).await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| MtdError::Malformed {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        // Refuse to persist something we could not load back.
        serde_json::from_value::<StopsResponse>(value.clone()).map_err(|e| {
            MtdError::Malformed {
                message: e.to_string(),
                body: None,
            }
        })?;

        Ok(value)
    }
}

impl DepartureSource for MtdClient {
    async fn get_departures_by_stop(
        &self,
        query: &DepartureQuery,
    ) -> Result<DeparturesResponse, MtdError> {
        MtdClient::get_departures_by_stop(self, query).await
    }
}
