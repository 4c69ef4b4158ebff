//! Iris Prediction Service Library
//!
//! An offline trainer fits a multinomial logistic regression on the bundled
//! iris dataset and writes a model artifact; the inference service loads that
//! artifact once at startup and serves predictions over HTTP.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod server;
pub mod training;
pub mod types;

pub use config::AppConfig;
pub use dataset::{Dataset, Label};
pub use error::ApiError;
pub use features::{FeatureVector, FEATURE_NAMES};
pub use metrics::ServiceMetrics;
pub use models::{InferenceEngine, ModelArtifact};
pub use server::{router, AppState};
pub use training::Trainer;
