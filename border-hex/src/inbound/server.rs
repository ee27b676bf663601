//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use border_types::{CountryDirectory, RateProvider};

use super::handlers::{self, AppState};
use crate::BorderExchangeService;
use crate::lifecycle::ServiceClock;
use crate::openapi::ApiDoc;

/// HTTP Server for the border exchange API.
pub struct HttpServer<D: CountryDirectory, R: RateProvider> {
    state: Arc<AppState<D, R>>,
}

impl<D: CountryDirectory, R: RateProvider> HttpServer<D, R> {
    /// Creates a new HTTP server with the given service.
    ///
    /// The uptime clock starts here, before any request can be served.
    pub fn new(service: BorderExchangeService<D, R>) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                clock: ServiceClock::start(),
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/", get(handlers::home))
            .route("/health", get(handlers::health))
            .route(
                "/exchange/v1/exchangeborder/{country_name}",
                get(handlers::exchange_border::<D, R>),
            )
            .route(
                "/exchange/v1/exchangehistory/{country_name}",
                get(handlers::exchange_history::<D, R>),
            )
            .route(
                "/exchange/v1/exchangehistory/{country_name}/{date_range}",
                get(handlers::exchange_history_range::<D, R>),
            )
            .route("/exchange/v1/diag", get(handlers::diagnostics::<D, R>))
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
