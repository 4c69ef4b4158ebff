//! Trainer determinism and the trainer -> service file handoff

use iris_prediction_service::config::TrainingConfig;
use iris_prediction_service::models::classifier::FittedModel;
use iris_prediction_service::{Dataset, FeatureVector, InferenceEngine, ModelArtifact, Trainer};

fn trainer() -> Trainer<iris_prediction_service::models::LogisticRegression> {
    Trainer::from_config(&TrainingConfig::default())
}

#[test]
fn repeated_training_uses_identical_partitions() {
    let dataset = Dataset::iris().unwrap();
    let first = trainer().fit(&dataset).unwrap();
    let second = trainer().fit(&dataset).unwrap();

    assert_eq!(first.split, second.split);
    assert_eq!(first.split.train.len(), 120);
    assert_eq!(first.split.test.len(), 30);
}

#[test]
fn saved_model_predicts_like_in_process_model() {
    let dataset = Dataset::iris().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app").join("model.joblib");

    let trained = trainer().fit(&dataset).unwrap();
    trained.artifact.save(&path).unwrap();

    let reloaded = InferenceEngine::load(&path).unwrap();
    for sample in dataset.samples() {
        assert_eq!(
            trained.artifact.model.predict(sample).unwrap(),
            reloaded.predict(sample).unwrap()
        );
    }
}

#[test]
fn train_and_save_writes_artifact() {
    let dataset = Dataset::iris().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app").join("model.joblib");

    let report = trainer().train_and_save(&dataset, &path).unwrap();
    assert_eq!(report.model_path, path);
    assert_eq!(report.train_samples, 120);
    assert_eq!(report.test_samples, 30);
    assert!(report.test_accuracy > 0.85);

    let artifact = ModelArtifact::load(&path).unwrap();
    assert_eq!(artifact.classes, vec![0, 1, 2]);
    assert_eq!(artifact.test_accuracy, report.test_accuracy);
}

#[test]
fn canonical_samples_after_reload() {
    let dataset = Dataset::iris().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.joblib");
    trainer().train_and_save(&dataset, &path).unwrap();

    let engine = InferenceEngine::load(&path).unwrap();
    assert_eq!(engine.predict(&FeatureVector::new(5.1, 3.5, 1.4, 0.2)).unwrap(), 0);
    assert_eq!(engine.predict(&FeatureVector::new(6.7, 3.0, 5.2, 2.3)).unwrap(), 2);
}

#[test]
fn corrupt_artifact_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.joblib");
    std::fs::write(&path, "{\"format_version\": 1}").unwrap();
    assert!(InferenceEngine::load(&path).is_err());
}

#[test]
fn reloaded_artifact_is_bit_identical() {
    let dataset = Dataset::iris().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.joblib");

    let trained = trainer().fit(&dataset).unwrap();
    trained.artifact.save(&path).unwrap();
    let reloaded = ModelArtifact::load(&path).unwrap();

    assert_eq!(
        reloaded.test_accuracy.to_bits(),
        trained.artifact.test_accuracy.to_bits()
    );
    assert_eq!(
        serde_json::to_string(&reloaded.model).unwrap(),
        serde_json::to_string(&trained.artifact.model).unwrap()
    );
}
