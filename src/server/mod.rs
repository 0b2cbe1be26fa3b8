//! HTTP server module
//!
//! Provides:
//! - Alert ingestion webhook (POST /alert)
//! - Health check (GET /health)
//! - A fault barrier converting any panic into a structured 500 response

mod handlers;
pub mod types;

use crate::error::Result;
use crate::state::AppState;
use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use std::backtrace::Backtrace;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use types::FaultResponse;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(CorsAny)
        .allow_methods(CorsAny)
        .allow_headers(CorsAny);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/alert", post(handlers::ingest_alert))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and run the server until ctrl-c
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.bind_addr();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Alert relay listening on {}", addr);
    info!("  POST http://{}/alert", addr);
    info!("  GET  http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Fault barrier: turn an uncaught panic into a structured 500 body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!("Unhandled panic in request handler: {}", detail);

    let body = FaultResponse {
        error_code: 500,
        error_message: detail,
        stack_trace: Backtrace::force_capture().to_string(),
    };
    let bytes = serde_json::to_vec(&body).unwrap_or_default();

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
