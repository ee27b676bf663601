//! Border Exchange Application Service
//!
//! Orchestrates the country directory and rate provider ports.
//! Contains NO infrastructure logic - pure aggregation.

use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::value::RawValue;
use tracing::{debug, info, warn};

use border_types::{
    AggregatedEntry, AppError, BorderFailure, BorderReport, CountryDirectory, CountryQuery,
    CountryRecord, DateRange, Diagnostic, FailurePolicy, FetchStage, RateProvider, UpstreamError,
    history_base, resolve_anchor,
};

use crate::lifecycle::ServiceClock;

/// Version reported by the diagnostics endpoint.
pub const API_VERSION: &str = "v1";

/// How borders of one origin are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    /// Maximum number of borders in flight at once (at least 1).
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            concurrency: 4,
            failure_policy: FailurePolicy::Isolate,
        }
    }
}

/// Application service for border exchange lookups.
///
/// Generic over both upstream ports - adapters are injected at compile time,
/// so tests can run against in-memory providers.
pub struct BorderExchangeService<D: CountryDirectory, R: RateProvider> {
    directory: D,
    rates: R,
    settings: AggregationSettings,
}

impl<D: CountryDirectory, R: RateProvider> BorderExchangeService<D, R> {
    /// Creates a new service with default aggregation settings.
    pub fn new(directory: D, rates: R) -> Self {
        Self {
            directory,
            rates,
            settings: AggregationSettings::default(),
        }
    }

    /// Replaces the aggregation settings. A concurrency of 0 is raised to 1.
    pub fn with_settings(mut self, settings: AggregationSettings) -> Self {
        self.settings = AggregationSettings {
            concurrency: settings.concurrency.max(1),
            ..settings
        };
        self
    }

    pub fn settings(&self) -> AggregationSettings {
        self.settings
    }

    #[cfg(test)]
    pub(crate) fn directory(&self) -> &D {
        &self.directory
    }

    #[cfg(test)]
    pub(crate) fn rate_provider(&self) -> &R {
        &self.rates
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Border Aggregation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Rates of every border country of `country`, in border-list order.
    ///
    /// Borders are processed by at most `concurrency` workers; each result is
    /// written to its border's slot so completion order never leaks into the
    /// output. With [`FailurePolicy::Isolate`] a failing border only loses its
    /// own entry, unless every border failed. With [`FailurePolicy::FailFast`]
    /// the lowest-index failure fails the request.
    #[tracing::instrument(skip(self), fields(policy = ?self.settings.failure_policy))]
    pub async fn exchange_border(&self, country: &str) -> Result<BorderReport, AppError> {
        let origin = self.resolve_origin(country).await?;
        let origin_currency = origin_currency(&origin)?;
        let borders = &origin.border_codes;

        info!(
            origin = %origin.name,
            currency = %origin_currency,
            borders = borders.len(),
            "Origin resolved"
        );

        let fail_fast = self.settings.failure_policy == FailurePolicy::FailFast;
        let mut slots: Vec<Option<Result<AggregatedEntry, BorderFailure>>> =
            (0..borders.len()).map(|_| None).collect();
        {
            let mut queue = borders.iter().enumerate();
            let mut in_flight = FuturesUnordered::new();
            let mut aborted = false;

            for (index, code) in queue.by_ref().take(self.settings.concurrency) {
                in_flight.push(self.aggregate_border(index, code, &origin_currency));
            }

            // Borders start in index order, so once fail-fast stops scheduling,
            // every lower-index border is already in flight or done.
            while let Some((index, outcome)) = in_flight.next().await {
                if let Err(failure) = &outcome {
                    warn!(
                        border = %failure.border_code,
                        stage = %failure.stage,
                        error = %failure.error,
                        "Border aggregation failed"
                    );
                    aborted |= fail_fast;
                }
                slots[index] = Some(outcome);

                if aborted {
                    continue;
                }
                if let Some((index, code)) = queue.next() {
                    in_flight.push(self.aggregate_border(index, code, &origin_currency));
                }
            }
        }

        let mut entries = Vec::with_capacity(slots.len());
        let mut failures = Vec::new();
        for outcome in slots.into_iter().flatten() {
            match outcome {
                Ok(entry) => entries.push(entry),
                Err(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() && (fail_fast || entries.is_empty()) {
            return Err(failures.remove(0).into());
        }

        info!(
            entries = entries.len(),
            failures = failures.len(),
            "Border aggregation complete"
        );

        Ok(BorderReport {
            origin: origin.name,
            origin_currency,
            entries,
            failures,
        })
    }

    /// Resolves one border and fetches its rate; tagged with the border's index.
    async fn aggregate_border(
        &self,
        index: usize,
        code: &str,
        origin_currency: &str,
    ) -> (usize, Result<AggregatedEntry, BorderFailure>) {
        let outcome = self
            .border_entry(code, origin_currency)
            .await
            .map_err(|(stage, error)| BorderFailure {
                index,
                border_code: code.to_string(),
                stage,
                error,
            });
        (index, outcome)
    }

    async fn border_entry(
        &self,
        code: &str,
        origin_currency: &str,
    ) -> Result<AggregatedEntry, (FetchStage, UpstreamError)> {
        let border = self
            .directory
            .lookup(&CountryQuery::code(code))
            .await
            .map_err(|e| (FetchStage::BorderLookup, e))?;

        let currency = border
            .primary_currency()
            .map_err(|e| (FetchStage::BorderLookup, e))?
            .to_string();
        let anchor = resolve_anchor(origin_currency, &currency);
        debug!(border = %code, %currency, anchor = %anchor.code(), "Anchor decided");

        let rates = self
            .rates
            .rates(&currency, anchor.code())
            .await
            .map_err(|e| (FetchStage::RateFetch, e))?;

        Ok(AggregatedEntry {
            country: border.name,
            currency_code: currency,
            anchor_code: anchor.anchor_code,
            rates,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // History & Diagnostics
    // ─────────────────────────────────────────────────────────────────────────────

    /// The rate provider's answer for the country's own currency, unmodified.
    ///
    /// Without a range this is the latest rate.
    #[tracing::instrument(skip(self))]
    pub async fn exchange_history(
        &self,
        country: &str,
        range: Option<DateRange>,
    ) -> Result<Box<RawValue>, AppError> {
        let origin = self.resolve_origin(country).await?;
        let currency = origin_currency(&origin)?;

        self.rates
            .rates_raw(&currency, history_base(&currency), range.as_ref())
            .await
            .map_err(|e| AppError::at_stage(FetchStage::RateFetch, currency.as_str(), e))
    }

    /// Probes both providers concurrently. An unreachable provider reports 0.
    #[tracing::instrument(skip(self, clock))]
    pub async fn diagnostics(&self, clock: &ServiceClock) -> Diagnostic {
        let (rates, directory) = tokio::join!(self.rates.probe(), self.directory.probe());

        Diagnostic {
            version: API_VERSION.to_string(),
            uptime: clock.uptime_label(),
            exchangeapi: probe_status("rates", rates),
            restcountries: probe_status("directory", directory),
        }
    }

    async fn resolve_origin(&self, country: &str) -> Result<CountryRecord, AppError> {
        self.directory
            .lookup(&CountryQuery::name(country))
            .await
            .map_err(|e| AppError::at_stage(FetchStage::OriginLookup, country, e))
    }
}

fn origin_currency(origin: &CountryRecord) -> Result<String, AppError> {
    origin
        .primary_currency()
        .map(str::to_string)
        .map_err(|e| AppError::at_stage(FetchStage::OriginLookup, origin.name.as_str(), e))
}

fn probe_status(provider: &str, result: Result<u16, UpstreamError>) -> u16 {
    result.unwrap_or_else(|e| {
        warn!(provider, error = %e, "Upstream probe failed");
        0
    })
}
