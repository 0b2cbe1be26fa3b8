//! HTTP endpoint handlers

use crate::error::AppError;
use crate::models::{Alert, AlertAction};
use crate::server::types::{Ack, AlertRequest};
use crate::state::AppState;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use tracing::info;

/// Health check endpoint - GET /health
pub async fn health() -> impl IntoResponse {
    Json(Ack::new("Server is up"))
}

/// Ingestion endpoint - POST /alert
///
/// Validates the payload, stamps a server-side receipt timestamp, buffers
/// the alert and schedules the forwarding call, then acknowledges
/// immediately. The response never waits on persistence or forwarding.
pub async fn ingest_alert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AlertRequest>,
) -> Result<impl IntoResponse, AppError> {
    let symbol = payload
        .instrument()
        .ok_or_else(|| AppError::Validation("Missing symbol in alert payload".to_string()))?;

    let action: AlertAction = payload
        .action
        .as_deref()
        .ok_or_else(|| AppError::Validation("Missing action in alert payload".to_string()))?
        .parse()?;

    // Client-supplied timestamps are ignored; the receipt stamp is the
    // ordering source of truth downstream.
    let alert = Alert::new(symbol, action);
    info!("Received alert: {} {}", alert.symbol, alert.action);

    state.queue.enqueue(alert.clone());
    state.forwarder.dispatch(alert);

    Ok((StatusCode::ACCEPTED, Json(Ack::new("Request received"))))
}
