//! Country directory records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UpstreamError;

/// What to ask the country directory for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryQuery {
    /// Free-text country name (the origin of an aggregation).
    Name(String),
    /// One or more alpha codes (borders), batched into a single call.
    Codes(Vec<String>),
}

impl CountryQuery {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self::Codes(vec![code.into()])
    }

    /// Rejects identifiers that would produce a meaningless upstream call.
    pub fn validate(&self) -> Result<(), UpstreamError> {
        let empty = match self {
            CountryQuery::Name(name) => name.trim().is_empty(),
            CountryQuery::Codes(codes) => {
                codes.is_empty() || codes.iter().any(|c| c.trim().is_empty())
            }
        };

        if empty {
            return Err(UpstreamError::InvalidQuery(
                "country identifier cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for CountryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryQuery::Name(name) => write!(f, "{}", name),
            CountryQuery::Codes(codes) => write!(f, "{}", codes.join(";")),
        }
    }
}

/// A country as reported by the directory provider.
///
/// Both lists keep provider order; nothing is sorted or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub currency_codes: Vec<String>,
    pub border_codes: Vec<String>,
}

impl CountryRecord {
    pub fn new(
        name: impl Into<String>,
        currency_codes: Vec<String>,
        border_codes: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            currency_codes,
            border_codes,
        }
    }

    /// The currency used for rate lookups: the first listed one.
    ///
    /// A country without any currency cannot take part in an aggregation.
    pub fn primary_currency(&self) -> Result<&str, UpstreamError> {
        self.currency_codes
            .first()
            .map(String::as_str)
            .ok_or_else(|| {
                UpstreamError::Malformed(format!("country '{}' lists no currency", self.name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(currencies: &[&str]) -> CountryRecord {
        CountryRecord::new(
            "Switzerland",
            currencies.iter().map(|c| c.to_string()).collect(),
            vec!["AUT".into(), "FRA".into()],
        )
    }

    #[test]
    fn test_primary_currency_is_first_listed() {
        assert_eq!(record(&["CHF", "EUR"]).primary_currency().unwrap(), "CHF");
    }

    #[test]
    fn test_missing_currency_is_malformed() {
        let binding = record(&[]);
        let result = binding.primary_currency();
        assert!(matches!(result, Err(UpstreamError::Malformed(msg)) if msg.contains("Switzerland")));
    }

    #[test]
    fn test_empty_queries_are_rejected() {
        assert!(CountryQuery::name("  ").validate().is_err());
        assert!(CountryQuery::Codes(vec![]).validate().is_err());
        assert!(CountryQuery::Codes(vec!["BEL".into(), "".into()]).validate().is_err());
        assert!(CountryQuery::name("France").validate().is_ok());
    }

    #[test]
    fn test_batched_codes_display() {
        let query = CountryQuery::Codes(vec!["BEL".into(), "NLD".into()]);
        assert_eq!(query.to_string(), "BEL;NLD");
    }
}
