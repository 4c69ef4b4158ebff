//! Offline training run: split, fit, evaluate, persist.

use crate::config::TrainingConfig;
use crate::dataset::{Dataset, Split};
use crate::models::artifact::ModelArtifact;
use crate::models::classifier::{accuracy, Classifier};
use crate::models::logistic::LogisticRegression;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Output of [`Trainer::fit`]
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub artifact: ModelArtifact,
    pub split: Split,
}

/// Summary of [`Trainer::train_and_save`]
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub model_path: PathBuf,
    pub train_samples: usize,
    pub test_samples: usize,
    pub test_accuracy: f64,
}

pub struct Trainer<C: Classifier> {
    classifier: C,
    config: TrainingConfig,
}

impl Trainer<LogisticRegression> {
    /// Logistic regression capped at `config.max_iterations`
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(
            LogisticRegression::with_max_iterations(config.max_iterations),
            config.clone(),
        )
    }
}

impl<C: Classifier> Trainer<C> {
    pub fn new(classifier: C, config: TrainingConfig) -> Self {
        Self { classifier, config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Partition `dataset`, fit on the training side and score the held-out side
    pub fn fit(&self, dataset: &Dataset) -> Result<TrainedModel> {
        let split = dataset
            .train_test_split(self.config.test_fraction, self.config.seed)
            .context("Failed to split dataset")?;

        info!(
            algorithm = self.classifier.name(),
            train = split.train.len(),
            test = split.test.len(),
            seed = self.config.seed,
            "Training classifier"
        );

        let model = self
            .classifier
            .fit(&split.train)
            .with_context(|| format!("Failed to fit {}", self.classifier.name()))?;

        let test_accuracy = accuracy(&model, &split.test).context("Failed to evaluate model")?;
        info!(test_accuracy, "Evaluated on held-out partition");

        let artifact = ModelArtifact::new(
            model.into(),
            split.train.classes(),
            split.train.len(),
            split.test.len(),
            test_accuracy,
        );

        Ok(TrainedModel { artifact, split })
    }

    /// [`Trainer::fit`] then write the artifact to `path`
    pub fn train_and_save<P: AsRef<Path>>(&self, dataset: &Dataset, path: P) -> Result<TrainingReport> {
        let path = path.as_ref();
        let trained = self.fit(dataset)?;

        trained
            .artifact
            .save(path)
            .with_context(|| format!("Failed to save model to {}", path.display()))?;

        info!(path = %path.display(), "Model artifact written");

        Ok(TrainingReport {
            model_path: path.to_path_buf(),
            train_samples: trained.artifact.train_samples,
            test_samples: trained.artifact.test_samples,
            test_accuracy: trained.artifact.test_accuracy,
        })
    }
}
