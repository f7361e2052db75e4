//! Persisted model artifact

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Dataset, ForestConfig, RandomForest, FEATURE_COLUMNS, N_FEATURES, TARGET_COLUMN};
use crate::domain::DomainError;

/// File name of the artifact inside the model directory
///
/// JSON stands in for the joblib pickle a scikit-learn job would leave in
/// `/opt/ml/model`; consumers load it with [`ModelArtifact`], not joblib.
pub const MODEL_FILE_NAME: &str = "model.json";

/// A fitted classifier plus the metadata needed to use it later
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub config: ForestConfig,
    pub accuracy: f64,
    pub trained_at: DateTime<Utc>,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, config: ForestConfig, accuracy: f64) -> Self {
        Self {
            feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            target_name: TARGET_COLUMN.to_string(),
            config,
            accuracy,
            trained_at: Utc::now(),
            forest,
        }
    }

    pub fn predict(&self, features: &[f64; N_FEATURES]) -> Result<u32, DomainError> {
        self.forest.predict(features)
    }

    /// Column names in the order the model expects, label last
    pub fn columns(&self) -> Vec<&str> {
        self.feature_names
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.target_name.as_str()))
            .collect()
    }

    pub fn matches_schema(&self) -> bool {
        self.columns() == Dataset::header()
    }
}
