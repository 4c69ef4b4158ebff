//! Feature vector shared by training and inference.
//!
//! Column order is fixed here and nowhere else: the dataset loader, the
//! trainer, request validation and the inference engine all go through
//! [`FeatureVector::to_array`] / [`FeatureVector::from_array`]. The model
//! artifact records [`FEATURE_NAMES`] so a mismatch is caught at load time.

use serde::{Deserialize, Serialize};

/// Number of features per sample.
pub const FEATURE_COUNT: usize = 4;

/// Feature names in model column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// One iris measurement, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl FeatureVector {
    pub fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    /// Inverse of [`FeatureVector::to_array`].
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [sepal_length, sepal_width, petal_length, petal_width] = values;
        Self::new(sepal_length, sepal_width, petal_length, petal_width)
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// True when `names` matches [`FEATURE_NAMES`] exactly, order included.
pub fn matches_feature_order<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_COUNT
        && names
            .iter()
            .zip(FEATURE_NAMES.iter())
            .all(|(name, expected)| name.as_ref() == *expected)
}
