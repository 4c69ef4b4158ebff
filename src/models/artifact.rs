//! On-disk model artifact written by the trainer and read by the service

use crate::dataset::Label;
use crate::features::{matches_feature_order, FEATURE_NAMES};
use crate::models::classifier::FittedClassifier;
use anyhow::{ensure, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bumped whenever the serialized layout changes incompatibly.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Fitted classifier plus the metadata needed to serve it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Column order the model was trained with
    pub feature_names: Vec<String>,
    /// Labels seen during training, ascending
    pub classes: Vec<Label>,
    pub trained_at: DateTime<Utc>,
    pub train_samples: usize,
    pub test_samples: usize,
    /// Accuracy on the held-out partition
    pub test_accuracy: f64,
    pub model: FittedClassifier,
}

impl ModelArtifact {
    pub fn new(
        model: FittedClassifier,
        classes: Vec<Label>,
        train_samples: usize,
        test_samples: usize,
        test_accuracy: f64,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            classes,
            trained_at: Utc::now(),
            train_samples,
            test_samples,
            test_accuracy,
            model,
        }
    }

    pub fn algorithm(&self) -> &'static str {
        self.model.algorithm()
    }

    /// Reject artifacts this build cannot serve
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.format_version == ARTIFACT_FORMAT_VERSION,
            "Unsupported artifact format version {} (expected {})",
            self.format_version,
            ARTIFACT_FORMAT_VERSION
        );
        ensure!(
            matches_feature_order(&self.feature_names),
            "Artifact feature order {:?} does not match {:?}",
            self.feature_names,
            FEATURE_NAMES
        );
        ensure!(!self.classes.is_empty(), "Artifact has no classes");
        Ok(())
    }

    /// Write as JSON, creating parent directories.
    ///
    /// The file is written next to `path` and renamed into place.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let payload = serde_json::to_vec_pretty(self).context("Failed to serialize model")?;
        let staging = staging_path(path);
        fs::write(&staging, payload)
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, path)
            .with_context(|| format!("Failed to move model into place at {}", path.display()))?;
        Ok(())
    }

    /// Read, deserialize and validate
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read model from {}", path.display()))?;
        let artifact: ModelArtifact = serde_json::from_slice(&bytes)
            .with_context(|| format!("Model file {} is corrupt", path.display()))?;
        artifact
            .validate()
            .with_context(|| format!("Model file {} is not usable", path.display()))?;
        Ok(artifact)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
