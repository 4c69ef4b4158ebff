//! Labeled iris dataset and its deterministic train/test partition

use crate::features::{matches_feature_order, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use anyhow::{bail, ensure, Context, Result};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

/// Class identifier produced by the classifier.
pub type Label = usize;

/// Number of species in the dataset.
pub const CLASS_COUNT: usize = 3;

/// Reference iris data, compiled into the binaries.
const IRIS_CSV: &str = include_str!("../data/iris.csv");

/// Name of the label column in the CSV header.
const LABEL_COLUMN: &str = "species";

/// Ordered sequence of (sample, label) pairs
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<FeatureVector>,
    labels: Vec<Label>,
}

/// Result of [`Dataset::train_test_split`]
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

impl Dataset {
    /// Build a dataset from parallel sample and label vectors
    pub fn new(samples: Vec<FeatureVector>, labels: Vec<Label>) -> Result<Self> {
        ensure!(
            samples.len() == labels.len(),
            "Dataset has {} samples but {} labels",
            samples.len(),
            labels.len()
        );
        if let Some(bad) = labels.iter().find(|&&label| label >= CLASS_COUNT) {
            bail!("Label {bad} is outside 0..{CLASS_COUNT}");
        }
        Ok(Self { samples, labels })
    }

    /// The bundled reference dataset (150 samples, 3 classes)
    pub fn iris() -> Result<Self> {
        Self::from_csv(IRIS_CSV).context("Failed to load bundled iris dataset")
    }

    /// Parse `sepal_length,sepal_width,petal_length,petal_width,species` rows
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().context("Dataset is empty")?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        ensure!(
            columns.len() == FEATURE_COUNT + 1
                && matches_feature_order(&columns[..FEATURE_COUNT])
                && columns[FEATURE_COUNT] == LABEL_COLUMN,
            "Unexpected header '{header}', expected '{},{LABEL_COLUMN}'",
            FEATURE_NAMES.join(",")
        );

        let mut samples = Vec::new();
        let mut labels = Vec::new();

        for (line_no, line) in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            ensure!(
                fields.len() == FEATURE_COUNT + 1,
                "Line {line_no}: expected {} columns, found {}",
                FEATURE_COUNT + 1,
                fields.len()
            );

            let mut values = [0.0; FEATURE_COUNT];
            for (slot, (raw, name)) in values.iter_mut().zip(fields.iter().zip(FEATURE_NAMES)) {
                *slot = raw
                    .parse::<f64>()
                    .with_context(|| format!("Line {line_no}: invalid {name} '{raw}'"))?;
            }

            let raw_label = fields[FEATURE_COUNT];
            let label: Label = raw_label
                .parse()
                .with_context(|| format!("Line {line_no}: invalid label '{raw_label}'"))?;
            ensure!(
                label < CLASS_COUNT,
                "Line {line_no}: label {label} is outside 0..{CLASS_COUNT}"
            );

            let sample = FeatureVector::from_array(values);
            ensure!(
                sample.is_finite(),
                "Line {line_no}: features must be finite, got {values:?}"
            );

            samples.push(sample);
            labels.push(label);
        }

        ensure!(!samples.is_empty(), "Dataset has a header but no rows");
        Self::new(samples, labels)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[FeatureVector] {
        &self.samples
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Distinct labels, ascending
    pub fn classes(&self) -> Vec<Label> {
        let mut classes = self.labels.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Feature matrix, one row per sample
    pub fn records(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), FEATURE_COUNT), |(row, col)| {
            self.samples[row].to_array()[col]
        })
    }

    pub fn targets(&self) -> Array1<Label> {
        Array1::from(self.labels.clone())
    }

    /// Shuffle indices with a seeded RNG and hold out `ceil(len * test_fraction)`
    /// samples for evaluation.
    ///
    /// The same dataset and seed always give the same partition.
    pub fn train_test_split(&self, test_fraction: f64, seed: u64) -> Result<Split> {
        ensure!(
            test_fraction > 0.0 && test_fraction < 1.0,
            "test_fraction must be in (0, 1), got {test_fraction}"
        );

        let total = self.len();
        let test_len = (total as f64 * test_fraction).ceil() as usize;
        ensure!(
            test_len > 0 && test_len < total,
            "Cannot split {total} samples with test_fraction {test_fraction}"
        );

        let mut indices: Vec<usize> = (0..total).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(test_len);

        debug!(
            seed,
            train = train_idx.len(),
            test = test_idx.len(),
            "Dataset split"
        );

        Ok(Split {
            train: self.subset(train_idx),
            test: self.subset(test_idx),
        })
    }

    fn subset(&self, indices: &[usize]) -> Self {
        Self {
            samples: indices.iter().map(|&i| self.samples[i]).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
