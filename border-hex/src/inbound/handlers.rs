//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::value::RawValue;

use border_types::{AppError, CountryDirectory, DateRange, ErrorResponse, RateProvider};

use crate::BorderExchangeService;
use crate::lifecycle::ServiceClock;

/// Set on border responses that are missing at least one border.
pub const PARTIAL_RESULT_HEADER: HeaderName = HeaderName::from_static("x-partial-result");
/// Comma-separated codes of the borders missing from a partial response.
pub const FAILED_BORDERS_HEADER: HeaderName = HeaderName::from_static("x-failed-borders");

pub const HELP_TEXT: &str = "Welcome to the border exchange gateway! Append one of the following \
paths to the current address, replacing the items in curly braces with your desired information.\n\n\
`/exchange/v1/exchangehistory/{country_name}`\n\
`/exchange/v1/exchangehistory/{country_name}/{begin_date-end_date}`\n\
`/exchange/v1/exchangeborder/{country_name}`\n\
`/exchange/v1/diag`\n";

/// Application state shared across handlers.
pub struct AppState<D: CountryDirectory, R: RateProvider> {
    pub service: BorderExchangeService<D, R>,
    pub clock: ServiceClock,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: status.as_u16(),
            stage: self.0.stage().map(|s| s.as_str().to_string()),
            identifier: self.0.identifier().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}

/// Static usage text.
pub async fn home() -> &'static str {
    HELP_TEXT
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Rates of every border country against its anchor currency.
#[tracing::instrument(skip(state))]
pub async fn exchange_border<D: CountryDirectory, R: RateProvider>(
    State(state): State<Arc<AppState<D, R>>>,
    Path(country_name): Path<String>,
) -> Result<Response, ApiError> {
    let report = state.service.exchange_border(&country_name).await?;

    let partial = report.is_partial();
    let failed = report.failed_codes().join(",");
    let mut response = Json(report.entries).into_response();

    if partial {
        let headers = response.headers_mut();
        headers.insert(PARTIAL_RESULT_HEADER, HeaderValue::from_static("true"));
        if let Ok(value) = HeaderValue::from_str(&failed) {
            headers.insert(FAILED_BORDERS_HEADER, value);
        }
    }

    Ok(response)
}

/// Writes the provider's JSON out exactly as it was received.
fn passthrough(body: Box<RawValue>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        body.get().to_owned(),
    )
        .into_response()
}

/// Latest rate of the country's own currency.
#[tracing::instrument(skip(state))]
pub async fn exchange_history<D: CountryDirectory, R: RateProvider>(
    State(state): State<Arc<AppState<D, R>>>,
    Path(country_name): Path<String>,
) -> Result<Response, ApiError> {
    let body = state.service.exchange_history(&country_name, None).await?;
    Ok(passthrough(body))
}

/// Rate history of the country's own currency between two dates.
#[tracing::instrument(skip(state))]
pub async fn exchange_history_range<D: CountryDirectory, R: RateProvider>(
    State(state): State<Arc<AppState<D, R>>>,
    Path((country_name, range)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let range: DateRange = range.parse()?;
    let body = state
        .service
        .exchange_history(&country_name, Some(range))
        .await?;
    Ok(passthrough(body))
}

/// Version, uptime and upstream status codes.
#[tracing::instrument(skip(state))]
pub async fn diagnostics<D: CountryDirectory, R: RateProvider>(
    State(state): State<Arc<AppState<D, R>>>,
) -> impl IntoResponse {
    Json(state.service.diagnostics(&state.clock).await)
}
