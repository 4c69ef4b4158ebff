//! Classifier capability and the serializable set of fitted models

use crate::dataset::{Dataset, Label};
use crate::features::FeatureVector;
use crate::models::logistic::{self, LogisticModel};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A learning algorithm that produces a [`FittedModel`] from labeled data.
pub trait Classifier {
    type Model: FittedModel + Into<FittedClassifier>;

    /// Stable identifier recorded in the model artifact
    fn name(&self) -> &'static str;

    fn fit(&self, train: &Dataset) -> Result<Self::Model>;
}

/// Trained state. Read-only, shared across request handlers.
pub trait FittedModel: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Label>;
}

/// Every fitted model the artifact format knows how to carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "state", rename_all = "snake_case")]
pub enum FittedClassifier {
    LogisticRegression(LogisticModel),
}

impl FittedClassifier {
    pub fn algorithm(&self) -> &'static str {
        match self {
            FittedClassifier::LogisticRegression(_) => logistic::ALGORITHM,
        }
    }
}

impl FittedModel for FittedClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        match self {
            FittedClassifier::LogisticRegression(model) => model.predict(features),
        }
    }
}

impl From<LogisticModel> for FittedClassifier {
    fn from(model: LogisticModel) -> Self {
        FittedClassifier::LogisticRegression(model)
    }
}

/// Share of `dataset` that `model` labels correctly
pub fn accuracy<M: FittedModel + ?Sized>(model: &M, dataset: &Dataset) -> Result<f64> {
    if dataset.is_empty() {
        return Ok(0.0);
    }

    let mut correct = 0usize;
    for (sample, &label) in dataset.samples().iter().zip(dataset.labels()) {
        if model.predict(sample)? == label {
            correct += 1;
        }
    }
    Ok(correct as f64 / dataset.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Labels by petal length alone
    struct PetalThreshold;

    impl FittedModel for PetalThreshold {
        fn predict(&self, features: &FeatureVector) -> Result<Label> {
            Ok(match features.petal_length {
                l if l < 2.5 => 0,
                l if l < 4.9 => 1,
                _ => 2,
            })
        }
    }

    #[test]
    fn test_accuracy_with_substitute_model() {
        let dataset = Dataset::iris().unwrap();
        let acc = accuracy(&PetalThreshold, &dataset).unwrap();
        assert!(acc > 0.9, "accuracy {acc}");
    }

    #[test]
    fn test_algorithm_matches_serialized_tag() {
        let dataset = Dataset::iris().unwrap();
        let params = logistic::LogisticRegression::default();
        let fitted = FittedClassifier::from(params.fit(&dataset).unwrap());

        let json = serde_json::to_value(&fitted).unwrap();
        assert_eq!(json["algorithm"], fitted.algorithm());
        assert_eq!(fitted.algorithm(), params.name());
    }

    #[test]
    fn test_accuracy_of_empty_dataset() {
        let empty = Dataset::new(vec![], vec![]).unwrap();
        assert_eq!(accuracy(&PetalThreshold, &empty).unwrap(), 0.0);
    }
}
