//! # Border Upstream
//!
//! Concrete adapters for the two providers the gateway aggregates.
//! This crate provides reqwest-based clients that implement the
//! `CountryDirectory` and `RateProvider` ports.

use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

pub mod directory;
pub mod rates;

mod http;

pub use directory::RestCountriesClient;
pub use rates::ExchangeRatesClient;

/// Where the upstream providers live and how long to wait for them.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub directory_base_url: String,
    pub rates_base_url: String,
    /// Per-call timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

/// Both upstream adapters, sharing one connection pool.
pub struct Upstreams {
    pub directory: RestCountriesClient,
    pub rates: ExchangeRatesClient,
}

/// Build both upstream adapters from configuration.
///
/// # Examples
///
/// ```ignore
/// let upstreams = build_upstreams(&UpstreamConfig {
///     directory_base_url: "https://restcountries.eu/rest/v2".into(),
///     rates_base_url: "https://api.exchangeratesapi.io".into(),
///     timeout: None,
/// })?;
/// ```
pub fn build_upstreams(config: &UpstreamConfig) -> anyhow::Result<Upstreams> {
    let client = http::build_client(config.timeout).context("failed to build HTTP client")?;

    let directory_url = Url::parse(&config.directory_base_url)
        .with_context(|| format!("invalid directory URL: {}", config.directory_base_url))?;
    let rates_url = Url::parse(&config.rates_base_url)
        .with_context(|| format!("invalid rates URL: {}", config.rates_base_url))?;

    tracing::debug!(
        directory = %directory_url,
        rates = %rates_url,
        timeout = ?config.timeout,
        "Upstream adapters configured"
    );

    Ok(Upstreams {
        directory: RestCountriesClient::new(directory_url, client.clone()),
        rates: ExchangeRatesClient::new(rates_url, client),
    })
}
