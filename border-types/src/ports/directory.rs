//! Country directory port.
//!
//! Resolves country names and alpha codes to [`CountryRecord`]s.
//! Implementations can be HTTP clients, in-memory fixtures, etc.

use crate::domain::{CountryQuery, CountryRecord};
use crate::error::UpstreamError;

/// Port trait for the country directory provider.
#[async_trait::async_trait]
pub trait CountryDirectory: Send + Sync + 'static {
    /// Returns every record matching the query, in provider order.
    ///
    /// One outbound call per invocation; an empty match list is returned
    /// as-is, not as an error.
    async fn lookup_all(&self, query: &CountryQuery) -> Result<Vec<CountryRecord>, UpstreamError>;

    /// Returns the first record matching the query.
    ///
    /// Fails with `NotFound` when the provider has no match.
    async fn lookup(&self, query: &CountryQuery) -> Result<CountryRecord, UpstreamError> {
        self.lookup_all(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::NotFound(query.to_string()))
    }

    /// Pings the provider and returns the HTTP status it answered with.
    async fn probe(&self) -> Result<u16, UpstreamError>;
}
