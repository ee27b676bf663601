//! Shared plumbing for the upstream HTTP adapters.

use std::time::Duration;

use border_types::UpstreamError;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder =
        Client::builder().user_agent(concat!("border-gateway/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// `base` with `segments` appended as percent-encoded path segments.
pub(crate) fn endpoint(provider: &str, base: &Url, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| {
            UpstreamError::Unavailable(format!("{}: base URL {} cannot take a path", provider, base))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> UpstreamError {
    UpstreamError::Unavailable(format!("{}: {}", provider, err))
}

/// Turns a non-success response into `Unavailable`, keeping the provider's
/// own error message when it sent one.
pub(crate) async fn status_error(provider: &str, resp: Response) -> UpstreamError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|e| e.as_str())
                .map(String::from)
        });

    match message {
        Some(message) => UpstreamError::Unavailable(format!(
            "{} returned HTTP {}: {}",
            provider,
            status.as_u16(),
            message
        )),
        None => UpstreamError::Unavailable(format!(
            "{} returned HTTP {}",
            provider,
            status.as_u16()
        )),
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &str,
    resp: Response,
) -> Result<T, UpstreamError> {
    let body = resp
        .text()
        .await
        .map_err(|e| transport_error(provider, e))?;
    serde_json::from_str(&body).map_err(|e| UpstreamError::Malformed(format!("{}: {}", provider, e)))
}

pub(crate) async fn probe(provider: &str, http: &Client, url: Url) -> Result<u16, UpstreamError> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(provider, e))?;
    Ok(resp.status().as_u16())
}
