//! HTTP presentation layer for ytsum
//!
//! Exposes the summarisation orchestrator as `POST /summarise`, plus health
//! endpoints, on an axum server.

use axum::{
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use ytsum_core::prelude::*;

mod handlers;
mod middleware;
mod models;

pub use models::*;

/// Body returned for a missing or `null` request
pub const NULL_REQUEST_MESSAGE: &str = "Request cannot be null";

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable permissive CORS
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_cors: true,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub summariser: Arc<Summariser>,
}

/// Build the axum router with all routes
pub fn build_router(summariser: Arc<Summariser>, config: &HttpConfig) -> Router {
    let app_state = AppState { summariser };

    let mut router = Router::new()
        // Health checks
        .route("/health", get(handlers::health::health_check))
        .route("/alive", get(handlers::health::liveness))
        // Summarisation
        .route("/summarise", post(handlers::summarise::summarise))
        .with_state(app_state);

    // Add middleware
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(middleware::request_logging));

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(service_builder)
}

/// Bind and serve until `shutdown` resolves
pub async fn serve<F>(summariser: Arc<Summariser>, config: HttpConfig, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Starting ytsum HTTP server on {}", config.bind_address);

    let router = build_router(summariser, &config);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    info!("ytsum listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("ytsum HTTP server stopped");
    Ok(())
}

/// Failures surfaced by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Body was empty or the JSON literal `null`
    NullRequest,
    /// Body was not a valid summary request document
    MalformedBody(String),
    Summary(SummaryError),
}

impl From<SummaryError> for ApiError {
    fn from(error: SummaryError) -> Self {
        ApiError::Summary(error)
    }
}

/// Map an orchestrator error to an HTTP status
pub fn status_for(error: &SummaryError) -> StatusCode {
    match error {
        SummaryError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        SummaryError::CompletionUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SummaryError::ExtractionFailed(_)
        | SummaryError::EmptySubtitles { .. }
        | SummaryError::CompletionFailed(_)
        | SummaryError::EmptyCompletion => StatusCode::BAD_GATEWAY,
    }
}

/// Convert orchestrator errors to HTTP status codes and responses
pub fn handle_summary_error(error: &SummaryError) -> (StatusCode, Json<ErrorResponse>) {
    let status = status_for(error);

    if error.is_client_error() {
        warn!("Rejected summary request: {} - {}", status, error);
    } else {
        error!(error = ?error, "Summary request failed: {} - {}", status, error);
    }

    let body = ErrorResponse::new(error.kind(), error.to_string()).with_field(error.field());
    (status, Json(body))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NullRequest => {
                warn!("Rejected summary request with null body");
                (StatusCode::BAD_REQUEST, Json(NULL_REQUEST_MESSAGE)).into_response()
            }
            ApiError::MalformedBody(message) => {
                warn!("Rejected malformed summary request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("malformed_body", message)),
                )
                    .into_response()
            }
            ApiError::Summary(error) => handle_summary_error(&error).into_response(),
        }
    }
}
