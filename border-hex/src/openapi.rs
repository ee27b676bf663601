//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use border_types::{AggregatedEntry, Diagnostic, ErrorResponse, FetchStage, RateTable};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Usage text
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Plain-text list of available endpoints", body = String, content_type = "text/plain")
    )
)]
async fn home() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Rates of every bordering country's currency
#[utoipa::path(
    get,
    path = "/exchange/v1/exchangeborder/{country_name}",
    tag = "exchange",
    params(
        ("country_name" = String, Path, description = "Country name, e.g. France")
    ),
    responses(
        (status = 200, description = "One entry per border, in border-list order. Partial answers carry `x-partial-result: true` and `x-failed-borders`.", body = Vec<AggregatedEntry>),
        (status = 400, description = "Empty country name", body = ErrorResponse),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 502, description = "An upstream provider failed", body = ErrorResponse)
    )
)]
async fn exchange_border() {}

/// Latest rate of the country's own currency
#[utoipa::path(
    get,
    path = "/exchange/v1/exchangehistory/{country_name}",
    tag = "exchange",
    params(
        ("country_name" = String, Path, description = "Country name, e.g. Norway")
    ),
    responses(
        (status = 200, description = "Rate provider answer, passed through", body = inline(serde_json::Value)),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 502, description = "An upstream provider failed", body = ErrorResponse)
    )
)]
async fn exchange_history() {}

/// Rate history of the country's own currency
#[utoipa::path(
    get,
    path = "/exchange/v1/exchangehistory/{country_name}/{date_range}",
    tag = "exchange",
    params(
        ("country_name" = String, Path, description = "Country name, e.g. Norway"),
        ("date_range" = String, Path, description = "`YYYY-MM-DD-YYYY-MM-DD`, start first", example = "2020-01-01-2020-01-31")
    ),
    responses(
        (status = 200, description = "Rate provider answer, passed through", body = inline(serde_json::Value)),
        (status = 400, description = "Malformed or inverted date range", body = ErrorResponse),
        (status = 404, description = "Unknown country", body = ErrorResponse),
        (status = 502, description = "An upstream provider failed", body = ErrorResponse)
    )
)]
async fn exchange_history_range() {}

/// Version, uptime and upstream status
#[utoipa::path(
    get,
    path = "/exchange/v1/diag",
    tag = "health",
    responses(
        (status = 200, description = "Diagnostic report", body = Diagnostic)
    )
)]
async fn diagnostics() {}

/// OpenAPI documentation for the border exchange API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Border Exchange Gateway API",
        version = "1.0.0",
        description = "Looks up the currencies of a country's neighbours and their exchange rates.\n\nFor each border country the rate is quoted against an anchor currency: USD when both countries use EUR, EUR when they share any other currency, otherwise the origin's own currency.",
        license(name = "MIT"),
    ),
    paths(
        home,
        health,
        exchange_border,
        exchange_history,
        exchange_history_range,
        diagnostics,
    ),
    components(
        schemas(
            AggregatedEntry,
            RateTable,
            Diagnostic,
            ErrorResponse,
            FetchStage,
        )
    ),
    tags(
        (name = "health", description = "Liveness and diagnostics"),
        (name = "exchange", description = "Border and history rate lookups"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/",
            "/health",
            "/exchange/v1/exchangeborder/{country_name}",
            "/exchange/v1/exchangehistory/{country_name}",
            "/exchange/v1/exchangehistory/{country_name}/{date_range}",
            "/exchange/v1/diag",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
