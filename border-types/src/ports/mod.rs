//! Port traits (interfaces for adapters).
//!
//! These are the contracts the upstream adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod directory;
mod rates;

pub use directory::CountryDirectory;
pub use rates::RateProvider;
