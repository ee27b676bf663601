//! Country directory adapter (REST Countries v2 API).

use border_types::{CountryDirectory, CountryQuery, CountryRecord, UpstreamError};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::http;

const PROVIDER: &str = "restcountries";

/// HTTP client for the country directory.
pub struct RestCountriesClient {
    base_url: Url,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct CountryDto {
    name: String,
    #[serde(default)]
    currencies: Vec<CurrencyDto>,
    #[serde(default)]
    borders: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CurrencyDto {
    code: Option<String>,
}

impl From<CountryDto> for CountryRecord {
    fn from(dto: CountryDto) -> Self {
        // Some territories list a currency without a code; those carry no rate.
        let currency_codes = dto.currencies.into_iter().filter_map(|c| c.code).collect();
        CountryRecord::new(dto.name, currency_codes, dto.borders)
    }
}

impl RestCountriesClient {
    pub fn new(base_url: Url, http: Client) -> Self {
        Self { base_url, http }
    }

    fn request_url(&self, query: &CountryQuery) -> Result<Url, UpstreamError> {
        match query {
            CountryQuery::Name(name) => {
                http::endpoint(PROVIDER, &self.base_url, &["name", name.as_str()])
            }
            CountryQuery::Codes(codes) => {
                let mut url = http::endpoint(PROVIDER, &self.base_url, &["alpha"])?;
                url.query_pairs_mut().append_pair("codes", &codes.join(";"));
                Ok(url)
            }
        }
    }
}

#[async_trait::async_trait]
impl CountryDirectory for RestCountriesClient {
    #[instrument(skip(self), fields(query = %query))]
    async fn lookup_all(&self, query: &CountryQuery) -> Result<Vec<CountryRecord>, UpstreamError> {
        query.validate()?;
        let url = self.request_url(query)?;

        debug!("Requesting {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| http::transport_error(PROVIDER, e))?;

        // The directory answers an unknown name with a 404 rather than an empty list.
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(query.to_string()));
        }
        if !resp.status().is_success() {
            return Err(http::status_error(PROVIDER, resp).await);
        }

        let countries: Vec<CountryDto> = http::read_json(PROVIDER, resp).await?;
        debug!("Directory returned {} record(s)", countries.len());
        Ok(countries.into_iter().map(CountryRecord::from).collect())
    }

    async fn probe(&self) -> Result<u16, UpstreamError> {
        http::probe(PROVIDER, &self.http, self.base_url.clone()).await
    }
}
