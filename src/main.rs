//! Iris Prediction Service - Main Entry Point
//!
//! Loads the trained model once, then serves `/health` and `/predict`.

use anyhow::{Context, Result};
use iris_prediction_service::{
    config::AppConfig,
    logging,
    metrics::{MetricsReporter, ServiceMetrics},
    models::inference::InferenceEngine,
    server::{self, AppState},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    info!("Starting Iris Prediction Service");

    // No request is accepted until this succeeds; the loader logs the cause
    let engine = Arc::new(
        InferenceEngine::load(&config.model.path)
            .context("Startup failed: model could not be loaded")?,
    );

    let metrics = Arc::new(ServiceMetrics::new());
    let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
    let reporter_task = tokio::spawn(reporter.start());

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    let state = AppState::new(engine, metrics.clone());
    let served = server::serve(listener, state).await;

    reporter_task.abort();
    info!("Prediction service shutting down...");
    metrics.print_summary();

    served
}
