//! Rate tables and date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;

/// Currency code → rate, as returned by the rate provider.
///
/// Sparse: a lookup only fills the requested symbol(s). Backed by a
/// `BTreeMap` so serialization order is stable across requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({"GBP": 0.8543}))]
pub struct RateTable(BTreeMap<String, f64>);

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        self.0.insert(code.into(), rate);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, f64>> for RateTable {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}

/// Inclusive date range for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    const DATE_FORMAT: &'static str = "%Y-%m-%d";
    const DATE_LEN: usize = 10;

    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::BadRequest(format!(
                "Date range starts after it ends: {} > {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start_param(&self) -> String {
        self.start.format(Self::DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(Self::DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_param(), self.end_param())
    }
}

/// Parses the `YYYY-MM-DD-YYYY-MM-DD` path segment.
impl FromStr for DateRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AppError::BadRequest(format!(
                "Invalid date range '{}', expected YYYY-MM-DD-YYYY-MM-DD",
                s
            ))
        };

        let start = s.get(..Self::DATE_LEN).ok_or_else(invalid)?;
        let separator = s.get(Self::DATE_LEN..Self::DATE_LEN + 1).ok_or_else(invalid)?;
        let end = s.get(Self::DATE_LEN + 1..).ok_or_else(invalid)?;
        if separator != "-" {
            return Err(invalid());
        }

        let start = NaiveDate::parse_from_str(start, Self::DATE_FORMAT).map_err(|_| invalid())?;
        let end = NaiveDate::parse_from_str(end, Self::DATE_FORMAT).map_err(|_| invalid())?;
        Self::new(start, end)
    }
}
