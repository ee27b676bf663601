//! Data Transfer Objects (DTOs) for gateway responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status report of the gateway and its upstream providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Diagnostic {
    /// API version
    #[schema(example = "v1")]
    pub version: String,
    /// Time since the server started, e.g. `1h2m`
    #[schema(example = "2m5s")]
    pub uptime: String,
    /// HTTP status of the rate provider probe (0 when unreachable)
    #[schema(example = 200)]
    pub exchangeapi: u16,
    /// HTTP status of the country directory probe (0 when unreachable)
    #[schema(example = 200)]
    pub restcountries: u16,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// HTTP status code
    #[schema(example = 502)]
    pub code: u16,
    /// Stage that failed: `origin_lookup`, `border_lookup` or `rate_fetch`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Country name, border code or currency the failing call was made for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}
