//! # Border Client SDK
//!
//! A typed Rust client for the border exchange API.

use border_types::{AggregatedEntry, DateRange, Diagnostic};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Response header flagging a border answer with missing borders.
pub const PARTIAL_RESULT_HEADER: &str = "x-partial-result";
/// Response header listing the codes of the missing borders.
pub const FAILED_BORDERS_HEADER: &str = "x-failed-borders";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Border rates for one country, as returned by the gateway.
#[derive(Debug, Clone)]
pub struct BorderRates {
    pub entries: Vec<AggregatedEntry>,
    /// Codes of the borders the gateway could not aggregate.
    pub failed_borders: Vec<String>,
}

impl BorderRates {
    pub fn is_partial(&self) -> bool {
        !self.failed_borders.is_empty()
    }
}

/// Border exchange API client.
pub struct BorderClient {
    base_url: String,
    http: Client,
}

impl BorderClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// The plain-text usage message served at `/`.
    pub async fn help(&self) -> Result<String, ClientError> {
        let resp = self.http.get(self.endpoint(&[])?).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::api_error(resp).await);
        }
        Ok(resp.text().await?)
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.endpoint(&["health"])?).send().await?;
        Ok(resp.status().is_success())
    }

    /// Rates of every border country of `country`.
    pub async fn exchange_border(&self, country: &str) -> Result<BorderRates, ClientError> {
        let url = self.endpoint(&["exchange", "v1", "exchangeborder", country])?;
        let resp = self.http.get(url).send().await?;

        let failed_borders = resp
            .headers()
            .get(FAILED_BORDERS_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(',')
                    .filter(|code| !code.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let entries = self.handle_response(resp).await?;

        Ok(BorderRates {
            entries,
            failed_borders,
        })
    }

    /// Rate history of the country's currency; the latest rate without a range.
    pub async fn exchange_history(
        &self,
        country: &str,
        range: Option<&DateRange>,
    ) -> Result<serde_json::Value, ClientError> {
        let range = range.map(DateRange::to_string);
        let mut segments = vec!["exchange", "v1", "exchangehistory", country];
        segments.extend(range.as_deref());
        self.get(&segments).await
    }

    /// Version, uptime and upstream status of the gateway.
    pub async fn diag(&self) -> Result<Diagnostic, ClientError> {
        self.get(&["exchange", "v1", "diag"]).await
    }

    /// The base URL with `segments` appended, each percent-encoded as one
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{}: cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let resp = self.http.get(self.endpoint(segments)?).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn api_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
