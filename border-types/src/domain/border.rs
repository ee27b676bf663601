//! Border aggregation results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::rates::RateTable;
use crate::error::UpstreamError;

/// One border country's currency and its rate against the anchor.
///
/// Field names on the wire follow the public API: `currency` is the border's
/// own currency, `code` the anchor, `rate` the rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AggregatedEntry {
    #[schema(example = "Germany")]
    pub country: String,
    #[serde(rename = "currency")]
    #[schema(example = "EUR")]
    pub currency_code: String,
    #[serde(rename = "code")]
    #[schema(example = "USD")]
    pub anchor_code: String,
    #[serde(rename = "rate")]
    pub rates: RateTable,
}

/// Where in the aggregation a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchStage {
    OriginLookup,
    BorderLookup,
    RateFetch,
}

impl FetchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStage::OriginLookup => "origin_lookup",
            FetchStage::BorderLookup => "border_lookup",
            FetchStage::RateFetch => "rate_fetch",
        }
    }
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchStage::OriginLookup => "origin lookup",
            FetchStage::BorderLookup => "border lookup",
            FetchStage::RateFetch => "rate fetch",
        };
        write!(f, "{}", label)
    }
}

/// A border that could not be aggregated.
#[derive(Debug, Clone)]
pub struct BorderFailure {
    /// Position of the border in the origin's border list.
    pub index: usize,
    pub border_code: String,
    pub stage: FetchStage,
    pub error: UpstreamError,
}

/// Outcome of aggregating every border of one origin.
///
/// `entries` and `failures` are each in border-list order; together they
/// account for every border exactly once.
#[derive(Debug, Clone)]
pub struct BorderReport {
    pub origin: String,
    pub origin_currency: String,
    pub entries: Vec<AggregatedEntry>,
    pub failures: Vec<BorderFailure>,
}

impl BorderReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed_codes(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(|f| f.border_code.as_str())
            .collect()
    }
}

/// What a failing border does to the rest of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure in the border's slot and keep going.
    #[default]
    Isolate,
    /// Fail the whole request with the first failing border.
    FailFast,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isolate" => Ok(FailurePolicy::Isolate),
            "fail-fast" | "fail_fast" | "failfast" => Ok(FailurePolicy::FailFast),
            other => Err(format!(
                "Unknown failure policy: {}. Supported: isolate, fail-fast",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_shape() {
        let mut rates = RateTable::new();
        rates.insert("EUR", 0.92);
        let entry = AggregatedEntry {
            country: "Germany".into(),
            currency_code: "EUR".into(),
            anchor_code: "USD".into(),
            rates,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"country":"Germany","currency":"EUR","code":"USD","rate":{"EUR":0.92}}"#
        );
    }

    #[test]
    fn test_failure_policy_parse() {
        assert_eq!("isolate".parse(), Ok(FailurePolicy::Isolate));
        assert_eq!("Fail-Fast".parse(), Ok(FailurePolicy::FailFast));
        assert!("sometimes".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(FetchStage::RateFetch.as_str(), "rate_fetch");
        assert_eq!(FetchStage::BorderLookup.to_string(), "border lookup");
    }
}
