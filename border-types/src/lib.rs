//! # Border Types
//!
//! Domain types and port traits for the border exchange gateway.
//! This crate has ZERO IO dependencies - only data structures,
//! the anchor-selection rule, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Country records, rate tables, the anchor rule, aggregation results
//! - `ports/` - Traits the upstream adapters must implement
//! - `dto/` - Wire shapes for the gateway API that are not domain values
//! - `error/` - Upstream and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AggregatedEntry, AnchorDecision, BorderFailure, BorderReport, CountryQuery, CountryRecord,
    DateRange, FailurePolicy, FetchStage, RateTable, history_base, resolve_anchor,
};
pub use dto::*;
pub use error::{AppError, UpstreamError};
pub use ports::{CountryDirectory, RateProvider};
