//! # Border Hex
//!
//! Application service layer and HTTP adapter for the border exchange gateway.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates the upstream ports)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `lifecycle/` - Service state created once at startup
//!
//! The service is generic over `D: CountryDirectory` and `R: RateProvider`,
//! allowing different upstream implementations to be injected.

pub mod inbound;
pub mod lifecycle;
pub mod openapi;
pub mod service;


pub use lifecycle::ServiceClock;
pub use service::{API_VERSION, AggregationSettings, BorderExchangeService};
