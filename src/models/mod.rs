//! Classifier capability, model artifact and inference components

pub mod artifact;
pub mod classifier;
pub mod inference;
pub mod loader;
pub mod logistic;

pub use artifact::ModelArtifact;
pub use classifier::{Classifier, FittedClassifier, FittedModel};
pub use inference::InferenceEngine;
pub use loader::ModelLoader;
pub use logistic::{LogisticModel, LogisticRegression};
