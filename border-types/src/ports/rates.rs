//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, mock providers, etc.

use serde_json::value::RawValue;

use crate::domain::{DateRange, RateTable};
use crate::error::UpstreamError;

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Latest rate of `symbol` expressed against `anchor`.
    ///
    /// The symbol is not validated locally; whatever the provider rejects
    /// comes back as `Unavailable`.
    async fn rates(&self, symbol: &str, anchor: &str) -> Result<RateTable, UpstreamError>;

    /// The provider's JSON answer for `symbol`, byte for byte.
    ///
    /// The body is only checked to be valid JSON; key order and number
    /// formatting are kept. `anchor: None` leaves the base to the provider;
    /// `range: None` asks for the latest rate instead of a history.
    async fn rates_raw(
        &self,
        symbol: &str,
        anchor: Option<&str>,
        range: Option<&DateRange>,
    ) -> Result<Box<RawValue>, UpstreamError>;

    /// Pings the provider and returns the HTTP status it answered with.
    async fn probe(&self) -> Result<u16, UpstreamError>;
}
