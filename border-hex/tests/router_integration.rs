//! Integration tests for the HTTP router.
//!
//! These tests drive the full middleware stack with the real upstream
//! adapters pointed at a mock provider, verifying status codes, error
//! bodies and the partial-result headers.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use border_hex::{
    BorderExchangeService,
    inbound::{FAILED_BORDERS_HEADER, HttpServer, PARTIAL_RESULT_HEADER},
};
use border_upstream::{UpstreamConfig, build_upstreams};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to build a router whose providers both live on `server`.
fn create_test_router(server: &MockServer) -> Router {
    let upstreams = build_upstreams(&UpstreamConfig {
        directory_base_url: server.url("/rest/v2"),
        rates_base_url: server.base_url(),
        timeout: None,
    })
    .unwrap();
    let service = BorderExchangeService::new(upstreams.directory, upstreams.rates);
    HttpServer::new(service).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// France bordering Germany (EUR) and Switzerland (CHF).
async fn mock_france(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v2/name/France");
            then.status(200).json_body(json!([{
                "name": "France",
                "currencies": [{"code": "EUR"}],
                "borders": ["DEU", "CHE"]
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v2/alpha")
                .query_param("codes", "DEU");
            then.status(200).json_body(json!([{
                "name": "Germany",
                "currencies": [{"code": "EUR"}],
                "borders": ["FRA"]
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v2/alpha")
                .query_param("codes", "CHE");
            then.status(200).json_body(json!([{
                "name": "Switzerland",
                "currencies": [{"code": "CHF"}],
                "borders": ["FRA"]
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/latest")
                .query_param("symbols", "EUR")
                .query_param("base", "USD");
            then.status(200)
                .json_body(json!({"rates": {"EUR": 0.9182}, "base": "USD", "date": "2020-03-02"}));
        })
        .await;
}

async fn mock_swiss_rate(server: &MockServer, status: u16) {
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/latest")
                .query_param("symbols", "CHF")
                .query_param("base", "EUR");
            if status == 200 {
                then.status(200)
                    .json_body(json!({"rates": {"CHF": 1.0612}, "base": "EUR", "date": "2020-03-02"}));
            } else {
                then.status(status).json_body(json!({"error": "rate service down"}));
            }
        })
        .await;
}

#[tokio::test]
async fn test_home_lists_endpoints() {
    let server = MockServer::start_async().await;
    let app = create_test_router(&server);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("/exchange/v1/exchangeborder/{country_name}"));
    assert!(text.contains("/exchange/v1/diag"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start_async().await;
    let app = create_test_router(&server);

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_exchange_border_full_result() {
    let server = MockServer::start_async().await;
    mock_france(&server).await;
    mock_swiss_rate(&server, 200).await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(get("/exchange/v1/exchangeborder/France"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(PARTIAL_RESULT_HEADER).is_none());
    assert_eq!(
        body_json(response).await,
        json!([
            {"country": "Germany", "currency": "EUR", "code": "USD", "rate": {"EUR": 0.9182}},
            {"country": "Switzerland", "currency": "CHF", "code": "EUR", "rate": {"CHF": 1.0612}}
        ])
    );
}

#[tokio::test]
async fn test_exchange_border_partial_result_headers() {
    let server = MockServer::start_async().await;
    mock_france(&server).await;
    mock_swiss_rate(&server, 500).await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(get("/exchange/v1/exchangeborder/France"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[PARTIAL_RESULT_HEADER], "true");
    assert_eq!(response.headers()[FAILED_BORDERS_HEADER], "CHE");

    let json = body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["country"], "Germany");
}

#[tokio::test]
async fn test_unknown_country_is_404_with_stage() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v2/name/Atlantis");
            then.status(404)
                .json_body(json!({"status": 404, "message": "Not Found"}));
        })
        .await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(get("/exchange/v1/exchangeborder/Atlantis"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], 404);
    assert_eq!(json["stage"], "origin_lookup");
    assert_eq!(json["identifier"], "Atlantis");
}

#[tokio::test]
async fn test_directory_outage_is_502() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v2/name/France");
            then.status(503);
        })
        .await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(get("/exchange/v1/exchangeborder/France"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], 502);
    assert_eq!(json["stage"], "origin_lookup");
}

#[tokio::test]
async fn test_history_range_returns_provider_bytes_unchanged() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v2/name/Norway");
            then.status(200).json_body(json!([{
                "name": "Norway",
                "currencies": [{"code": "NOK"}],
                "borders": ["FIN", "SWE", "RUS"]
            }]));
        })
        .await;
    // Not alphabetically ordered, and 9.8400 would lose its zeros if re-encoded.
    let history = r#"{"rates":{"2020-01-02":{"NOK":9.8400}},"start_at":"2020-01-01","end_at":"2020-01-03","base":"EUR"}"#;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/history")
                .query_param("start_at", "2020-01-01")
                .query_param("end_at", "2020-01-03")
                .query_param("symbols", "NOK");
            then.status(200)
                .header("content-type", "application/json")
                .body(history);
        })
        .await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(get("/exchange/v1/exchangehistory/Norway/2020-01-01-2020-01-03"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, history.as_bytes());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_inverted_date_range_is_400_without_upstream_calls() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(500);
        })
        .await;
    let app = create_test_router(&server);

    let response = app
        .oneshot(get("/exchange/v1/exchangehistory/Norway/2020-02-01-2020-01-01"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], 400);
    catch_all.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_diag_reports_provider_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v2");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(400);
        })
        .await;
    let app = create_test_router(&server);

    let response = app.oneshot(get("/exchange/v1/diag")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], "v1");
    assert_eq!(json["restcountries"], 200);
    assert_eq!(json["exchangeapi"], 400);
    assert!(json["uptime"].as_str().unwrap().ends_with('s'));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = MockServer::start_async().await;
    let app = create_test_router(&server);

    let response = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/exchange/v1/diag"].is_object());
}
