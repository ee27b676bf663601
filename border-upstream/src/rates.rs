//! Rate provider adapter (exchangeratesapi.io).

use std::collections::BTreeMap;

use border_types::{DateRange, RateProvider, RateTable, UpstreamError};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, instrument};

use crate::http;

const PROVIDER: &str = "exchangeratesapi";

/// HTTP client for the currency rate provider.
pub struct ExchangeRatesClient {
    base_url: Url,
    http: Client,
}

/// `/latest` answer: `{"rates": {"GBP": 0.85}, "base": "EUR", "date": "2020-01-01"}`.
#[derive(Debug, Deserialize)]
struct LatestRatesDto {
    rates: BTreeMap<String, f64>,
}

impl ExchangeRatesClient {
    pub fn new(base_url: Url, http: Client) -> Self {
        Self { base_url, http }
    }

    /// The provider's response body, unparsed.
    async fn fetch(
        &self,
        symbol: &str,
        anchor: Option<&str>,
        range: Option<&DateRange>,
    ) -> Result<String, UpstreamError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        let path = match range {
            Some(range) => {
                params.push(("start_at", range.start_param()));
                params.push(("end_at", range.end_param()));
                "history"
            }
            None => "latest",
        };
        params.push(("symbols", symbol.to_string()));
        if let Some(anchor) = anchor {
            params.push(("base", anchor.to_string()));
        }

        let url = http::endpoint(PROVIDER, &self.base_url, &[path])?;
        debug!("Requesting {} with {:?}", url, params);

        let resp = self
            .http
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| http::transport_error(PROVIDER, e))?;

        if !resp.status().is_success() {
            return Err(http::status_error(PROVIDER, resp).await);
        }

        resp.text()
            .await
            .map_err(|e| http::transport_error(PROVIDER, e))
    }
}

#[async_trait::async_trait]
impl RateProvider for ExchangeRatesClient {
    #[instrument(skip(self))]
    async fn rates(&self, symbol: &str, anchor: &str) -> Result<RateTable, UpstreamError> {
        let body = self.fetch(symbol, Some(anchor), None).await?;
        let dto: LatestRatesDto = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::Malformed(format!("{}: {}", PROVIDER, e)))?;

        let table = RateTable::from(dto.rates);
        if !table.contains(symbol) {
            return Err(UpstreamError::Malformed(format!(
                "{}: no rate for {} against {}",
                PROVIDER, symbol, anchor
            )));
        }

        Ok(table)
    }

    #[instrument(skip(self))]
    async fn rates_raw(
        &self,
        symbol: &str,
        anchor: Option<&str>,
        range: Option<&DateRange>,
    ) -> Result<Box<RawValue>, UpstreamError> {
        let body = self.fetch(symbol, anchor, range).await?;
        RawValue::from_string(body)
            .map_err(|e| UpstreamError::Malformed(format!("{}: {}", PROVIDER, e)))
    }

    async fn probe(&self) -> Result<u16, UpstreamError> {
        http::probe(PROVIDER, &self.http, self.base_url.clone()).await
    }
}
