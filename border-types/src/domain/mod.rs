//! Domain models for the border exchange gateway.

pub mod anchor;
pub mod border;
pub mod country;
pub mod rates;

pub use anchor::{AnchorDecision, history_base, resolve_anchor};
pub use border::{AggregatedEntry, BorderFailure, BorderReport, FailurePolicy, FetchStage};
pub use country::{CountryQuery, CountryRecord};
pub use rates::{DateRange, RateTable};
