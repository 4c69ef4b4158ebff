//! HTTP surface: `GET /health` and `POST /predict`

use crate::error::ApiError;
use crate::metrics::ServiceMetrics;
use crate::models::inference::InferenceEngine;
use crate::types::{ErrorDetail, ErrorResponse, HealthResponse, IrisInput, PredictionResponse};
use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Handles shared by every request.
///
/// Only constructible from a loaded [`InferenceEngine`], so a router never
/// exists without a model.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<InferenceEngine>,
    metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(engine: Arc<InferenceEngine>, metrics: Arc<ServiceMetrics>) -> Self {
        Self { engine, metrics }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn metrics(&self) -> &Arc<ServiceMetrics> {
        &self.metrics
    }
}

pub fn router(state: AppState) -> Router {
    with_middleware(
        Router::new()
            .route("/health", get(health))
            .route("/predict", post(predict)),
    )
    .with_state(state)
}

/// Request tracing, and a 500 instead of a dropped connection when a handler panics
pub fn with_middleware<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("Request handler panicked");
    let body = ErrorResponse {
        detail: ErrorDetail::Message("Internal server error".to_string()),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let started = Instant::now();
    state.metrics.record_request();

    let input = body
        .map_err(ApiError::from)
        .and_then(|Json(value)| IrisInput::from_json(&value).map_err(ApiError::Validation))
        .inspect_err(|_| state.metrics.record_rejection())?;

    let prediction = state
        .engine
        .predict(&input.features())
        .map_err(ApiError::Inference)
        .inspect_err(|_| state.metrics.record_failure())?;

    let latency = started.elapsed();
    state.metrics.record_prediction(prediction, latency);
    debug!(prediction, latency_us = latency.as_micros() as u64, "Prediction served");

    Ok(Json(PredictionResponse { prediction }))
}

/// Serve `state` on `listener` until Ctrl-C or SIGTERM
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr().context("Listener has no local address")?;
    info!(%address, "Serving /health and /predict");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
