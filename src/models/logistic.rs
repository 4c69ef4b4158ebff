//! Multinomial logistic regression backed by linfa

use crate::dataset::{Dataset, Label};
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::models::classifier::{Classifier, FittedModel};
use anyhow::{anyhow, Context, Result};
use linfa::traits::{Fit, Predict};
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Identifier stored as the artifact's `algorithm` tag
pub const ALGORITHM: &str = "logistic_regression";

/// Fitting parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Optimizer iteration cap. Reaching it is not an error.
    pub max_iterations: u64,
    /// L2 regularization strength
    pub alpha: f64,
    /// Gradient norm at which the optimizer stops early
    pub gradient_tolerance: f64,
}

impl LogisticRegression {
    pub fn with_max_iterations(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            ..Self::default()
        }
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            alpha: 1.0,
            gradient_tolerance: 1e-4,
        }
    }
}

/// Fitted weights (one row per class), intercepts and the parameters used to fit them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    params: LogisticRegression,
    fitted: MultiFittedLogisticRegression<f64, Label>,
}

impl LogisticModel {
    pub fn params(&self) -> &LogisticRegression {
        &self.params
    }
}

impl Classifier for LogisticRegression {
    type Model = LogisticModel;

    fn name(&self) -> &'static str {
        ALGORITHM
    }

    fn fit(&self, train: &Dataset) -> Result<LogisticModel> {
        let classes = train.classes();
        if classes.len() < 2 {
            return Err(anyhow!(
                "Need at least two classes to fit, found {}",
                classes.len()
            ));
        }

        info!(
            samples = train.len(),
            classes = classes.len(),
            max_iterations = self.max_iterations,
            alpha = self.alpha,
            "Fitting logistic regression"
        );

        let data = linfa::Dataset::new(train.records(), train.targets());
        let fitted = MultiLogisticRegression::default()
            .max_iterations(self.max_iterations)
            .alpha(self.alpha)
            .gradient_tolerance(self.gradient_tolerance)
            .fit(&data)
            .map_err(|e| anyhow!("Logistic regression fit failed: {e}"))?;

        debug!("Logistic regression fitted");

        Ok(LogisticModel {
            params: self.clone(),
            fitted,
        })
    }
}

impl FittedModel for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let row = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_array().to_vec())
            .context("Failed to shape feature row")?;

        let predicted: Array1<Label> = self.fitted.predict(&row);

        predicted
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Classifier returned no prediction"))
    }
}
