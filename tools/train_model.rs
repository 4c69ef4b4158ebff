//! Model Trainer
//!
//! Fits the classifier on the bundled iris dataset and writes the artifact
//! the inference service loads at startup. Takes no arguments.

use anyhow::Result;
use iris_prediction_service::{config::AppConfig, dataset::Dataset, logging, training::Trainer};
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    let dataset = Dataset::iris()?;
    info!(samples = dataset.len(), "Dataset loaded");

    let report = Trainer::from_config(&config.training).train_and_save(&dataset, &config.model.path)?;

    info!(
        train = report.train_samples,
        test = report.test_samples,
        test_accuracy = format!("{:.3}", report.test_accuracy),
        "Training complete"
    );
    println!("Model saved successfully to {}", report.model_path.display());

    Ok(())
}
