//! Training service - dataset preprocessing and random forest training jobs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::training::{train_test_split, ForestConfig, ModelArtifact, RandomForest};
use crate::domain::DomainError;
use crate::infrastructure::dataset::{load_iris, read_dataset, write_dataset};
use crate::infrastructure::model_store::save_model;

pub const PROCESSED_FILE_NAME: &str = "processed.csv";

/// Result of a completed training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    pub model_file: PathBuf,
    pub accuracy: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Split and seeding parameters shared by every training run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingService {
    seed: u64,
    test_fraction: f64,
}

impl Default for TrainingService {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
        }
    }
}

impl TrainingService {
    pub fn new(seed: u64, test_fraction: f64) -> Self {
        Self {
            seed,
            test_fraction,
        }
    }

    /// Write the built-in Iris dataset to `<output_dir>/processed.csv`
    pub fn materialize_dataset(&self, output_dir: &Path) -> Result<PathBuf, DomainError> {
        info!(output_dir = %output_dir.display(), "Starting preprocessing job");

        fs::create_dir_all(output_dir).map_err(|e| {
            DomainError::storage(format!("Failed to create {}: {}", output_dir.display(), e))
        })?;

        let dataset = load_iris();
        let path = output_dir.join(PROCESSED_FILE_NAME);
        write_dataset(&dataset, &path)?;

        info!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.n_columns(),
            "Saved processed data"
        );

        Ok(path)
    }

    /// Train a forest on the CSV at `input_path` and persist it under `model_path`
    pub fn train(
        &self,
        input_path: &Path,
        model_path: &Path,
        n_estimators: usize,
    ) -> Result<TrainingOutcome, DomainError> {
        info!(
            input_path = %input_path.display(),
            model_path = %model_path.display(),
            n_estimators,
            "Starting training job"
        );

        self.ensure_input(input_path)?;

        let dataset = read_dataset(input_path)?;
        info!(
            rows = dataset.len(),
            columns = dataset.n_columns(),
            classes = dataset.n_classes(),
            "Loaded training data"
        );

        let split = train_test_split(dataset.len(), self.test_fraction, self.seed)?;
        let config = ForestConfig::new(n_estimators, self.seed);
        let forest = RandomForest::fit(dataset.samples(), &split.train, &config)?;

        let accuracy = forest.accuracy(dataset.samples(), &split.test)?;
        info!("Training complete. Accuracy: {:.4}", accuracy);

        let artifact = ModelArtifact::new(forest, config, accuracy);
        let model_file = save_model(&artifact, model_path)?;
        info!("Model saved to: {}", model_file.display());

        Ok(TrainingOutcome {
            model_file,
            accuracy,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
        })
    }

    /// Regenerate the dataset next to a missing input, then re-check
    fn ensure_input(&self, input_path: &Path) -> Result<(), DomainError> {
        if input_path.exists() {
            return Ok(());
        }

        let parent = input_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        warn!(
            input_path = %input_path.display(),
            "Input not found, running preprocessing into {}",
            parent.display()
        );
        self.materialize_dataset(parent)?;

        if input_path.exists() {
            Ok(())
        } else {
            Err(DomainError::input_not_found(input_path.display().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training::{Dataset, MODEL_FILE_NAME};
    use crate::infrastructure::model_store::load_model;
    use tempfile::TempDir;

    fn service() -> TrainingService {
        TrainingService::default()
    }

    #[test]
    fn test_materialized_dataset_shape() {
        let dir = TempDir::new().unwrap();
        let path = service()
            .materialize_dataset(&dir.path().join("processed_output"))
            .unwrap();

        assert!(path.ends_with("processed_output/processed.csv"));
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 151);
        assert_eq!(
            lines[0],
            "sepal length (cm),sepal width (cm),petal length (cm),petal width (cm),target"
        );
        assert!(lines[1..].iter().all(|l| l.split(',').count() == 5));

        let dataset = read_dataset(&path).unwrap();
        assert_eq!(dataset.len(), 150);
        assert_eq!(dataset.n_classes(), 3);
    }

    #[test]
    fn test_train_end_to_end() {
        let dir = TempDir::new().unwrap();
        let svc = service();
        let input = svc.materialize_dataset(dir.path()).unwrap();
        let model_dir = dir.path().join("model");

        let outcome = svc.train(&input, &model_dir, 20).unwrap();

        assert_eq!(outcome.model_file, model_dir.join(MODEL_FILE_NAME));
        assert!(outcome.model_file.exists());
        assert_eq!(outcome.test_rows, 30);
        assert_eq!(outcome.train_rows, 120);
        assert!((0.0..=1.0).contains(&outcome.accuracy));
        assert!(outcome.accuracy >= 0.8, "accuracy {}", outcome.accuracy);

        let artifact = load_model(&outcome.model_file).unwrap();
        assert_eq!(artifact.forest.n_estimators(), 20);
        assert_eq!(artifact.accuracy, outcome.accuracy);
        // a typical setosa
        assert_eq!(artifact.predict(&[5.0, 3.4, 1.5, 0.2]).unwrap(), 0);
    }

    #[test]
    fn test_training_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let svc = service();
        let input = svc.materialize_dataset(dir.path()).unwrap();

        let first = svc.train(&input, &dir.path().join("a"), 10).unwrap();
        let second = svc.train(&input, &dir.path().join("b"), 10).unwrap();

        assert_eq!(first.accuracy, second.accuracy);
        let a = load_model(&first.model_file).unwrap();
        let b = load_model(&second.model_file).unwrap();
        assert_eq!(
            serde_json::to_value(&a.forest).unwrap(),
            serde_json::to_value(&b.forest).unwrap()
        );
    }

    #[test]
    fn test_missing_input_is_regenerated() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("train").join(PROCESSED_FILE_NAME);

        let outcome = service()
            .train(&input, &dir.path().join("model"), 5)
            .unwrap();

        assert!(input.exists());
        assert!(outcome.model_file.exists());
    }

    #[test]
    fn test_missing_input_with_other_name_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("iris.csv");
        let model_dir = dir.path().join("model");

        let err = service().train(&input, &model_dir, 5).unwrap_err();

        assert!(matches!(err, DomainError::InputNotFound { .. }));
        assert!(!model_dir.join(MODEL_FILE_NAME).exists());
    }

    #[test]
    fn test_schema_mismatch_writes_no_model() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.csv");
        fs::write(&input, "a,b,c,d,target\n1,2,3,4,0\n").unwrap();
        let model_dir = dir.path().join("model");

        let err = service().train(&input, &model_dir, 5).unwrap_err();

        match err {
            DomainError::SchemaValidation { expected, found } => {
                assert_eq!(expected.len(), 4);
                assert_eq!(found, vec!["a", "b", "c", "d", "target"]);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(!model_dir.exists());
    }

    #[test]
    fn test_nan_feature_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("nan.csv");
        let mut text = format!("{}\n", Dataset::header().join(","));
        for i in 0..10 {
            text.push_str(&format!("5.{},3.4,1.5,0.2,0\n", i));
            text.push_str("nan,nan,nan,nan,1\n");
        }
        fs::write(&input, text).unwrap();
        let model_dir = dir.path().join("model");

        let err = service().train(&input, &model_dir, 5).unwrap_err();

        assert!(matches!(err, DomainError::Storage { .. }));
        assert!(err.to_string().contains("'nan' is not a finite number"));
        assert!(!model_dir.exists());
    }

    #[test]
    fn test_zero_estimators_is_rejected() {
        let dir = TempDir::new().unwrap();
        let svc = service();
        let input = svc.materialize_dataset(dir.path()).unwrap();

        let err = svc.train(&input, &dir.path().join("model"), 0).unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
