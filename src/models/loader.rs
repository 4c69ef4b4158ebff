//! Model artifact loader

use crate::models::artifact::ModelArtifact;
use anyhow::Result;
use std::path::Path;
use tracing::{error, info};

/// Loads the artifact once at service startup
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelLoader;

impl ModelLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load and validate the artifact at `path`.
    ///
    /// A missing or corrupt file is an error; there is no fallback model.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ModelArtifact> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading model artifact");

        let artifact = ModelArtifact::load(path).inspect_err(|e| {
            error!(path = %path.display(), error = format!("{e:#}"), "Model artifact unusable");
        })?;

        info!(
            algorithm = artifact.algorithm(),
            classes = ?artifact.classes,
            trained_at = %artifact.trained_at,
            test_accuracy = artifact.test_accuracy,
            "Model loaded successfully"
        );

        Ok(artifact)
    }
}
