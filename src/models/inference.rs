//! Read-only inference over the loaded model

use crate::dataset::Label;
use crate::features::FeatureVector;
use crate::models::artifact::ModelArtifact;
use crate::models::classifier::FittedModel;
use crate::models::loader::ModelLoader;
use anyhow::{bail, Result};
use std::path::Path;
use tracing::debug;

/// Loaded model, immutable after construction.
///
/// Share it as `Arc<InferenceEngine>`; `predict` takes `&self` and needs no lock.
#[derive(Debug)]
pub struct InferenceEngine {
    artifact: ModelArtifact,
}

impl InferenceEngine {
    /// Load the artifact at `path` and build the engine
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let artifact = ModelLoader::new().load(path)?;
        Self::from_artifact(artifact)
    }

    /// Build from an in-memory artifact (e.g. right after training)
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn classes(&self) -> &[Label] {
        &self.artifact.classes
    }

    /// Predict one label for one feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<Label> {
        if !features.is_finite() {
            bail!("Feature vector contains non-finite values: {features:?}");
        }

        let label = self.artifact.model.predict(features)?;

        if !self.artifact.classes.contains(&label) {
            bail!(
                "Classifier produced label {label}, not one of {:?}",
                self.artifact.classes
            );
        }

        debug!(?features, label, "Inference complete");
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::models::classifier::Classifier;
    use crate::models::logistic::LogisticRegression;

    fn engine() -> InferenceEngine {
        let dataset = Dataset::iris().unwrap();
        let model = LogisticRegression::default().fit(&dataset).unwrap();
        let artifact = ModelArtifact::new(model.into(), dataset.classes(), dataset.len(), 0, 0.0);
        InferenceEngine::from_artifact(artifact).unwrap()
    }

    #[test]
    fn test_predictions_are_known_classes() {
        let engine = engine();
        let dataset = Dataset::iris().unwrap();
        for sample in dataset.samples() {
            let label = engine.predict(sample).unwrap();
            assert!(engine.classes().contains(&label));
        }
    }

    #[test]
    fn test_non_finite_features_are_errors() {
        let engine = engine();
        let bad = FeatureVector::new(f64::NAN, 3.0, 1.0, 0.2);
        assert!(engine.predict(&bad).is_err());
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let dataset = Dataset::iris().unwrap();
        let model = LogisticRegression::with_max_iterations(50).fit(&dataset).unwrap();
        // Pretend only class 1 was ever seen
        let artifact = ModelArtifact::new(model.into(), vec![1], dataset.len(), 0, 0.0);
        let engine = InferenceEngine::from_artifact(artifact).unwrap();
        let setosa = FeatureVector::new(5.1, 3.5, 1.4, 0.2);
        assert!(engine.predict(&setosa).is_err());
    }

    #[test]
    fn test_load_missing_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.joblib");
        let err = InferenceEngine::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()), "{err:#}");
    }
}
