//! Random forest classifier backed by smartcore

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::{Sample, N_FEATURES};
use crate::domain::DomainError;

type ForestModel = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub seed: u64,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 20,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl ForestConfig {
    pub fn new(n_estimators: usize, seed: u64) -> Self {
        Self {
            n_estimators,
            seed,
            ..Default::default()
        }
    }

    fn parameters(&self) -> Result<RandomForestClassifierParameters, DomainError> {
        let n_trees = u16::try_from(self.n_estimators)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "n_estimators must be between 1 and {}, got {}",
                    u16::MAX,
                    self.n_estimators
                ))
            })?;

        let mut parameters = RandomForestClassifierParameters::default()
            .with_n_trees(n_trees)
            .with_min_samples_split(self.min_samples_split)
            .with_seed(self.seed);
        if let Some(depth) = self.max_depth {
            parameters = parameters.with_max_depth(depth);
        }

        Ok(parameters)
    }
}

/// Fitted random forest
///
/// Labels may be any `u32`; the model keeps the distinct labels it was
/// trained on and only ever predicts one of them.
#[derive(Debug, Serialize, Deserialize)]
pub struct RandomForest {
    n_estimators: usize,
    classes: Vec<u32>,
    model: ForestModel,
}

impl RandomForest {
    /// Fit on `samples[rows]` with bootstrap bagging and `sqrt(n_features)` split candidates
    pub fn fit(
        samples: &[Sample],
        rows: &[usize],
        config: &ForestConfig,
    ) -> Result<Self, DomainError> {
        let parameters = config.parameters()?;
        if rows.is_empty() {
            return Err(DomainError::validation("Cannot fit a forest on zero rows"));
        }
        if let Some(&row) = rows
            .iter()
            .find(|&&r| samples[r].features.iter().any(|v| !v.is_finite()))
        {
            return Err(DomainError::validation(format!(
                "Row {} has a feature value that is not a finite number",
                row
            )));
        }

        let x = feature_matrix(rows.iter().map(|&r| &samples[r].features));
        let y: Vec<u32> = rows.iter().map(|&r| samples[r].label).collect();

        let model = RandomForestClassifier::fit(&x, &y, parameters)
            .map_err(|e| DomainError::training(format!("Random forest fit failed: {}", e)))?;

        let mut classes = y;
        classes.sort_unstable();
        classes.dedup();

        Ok(Self {
            n_estimators: config.n_estimators,
            classes,
            model,
        })
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn predict(&self, features: &[f64; N_FEATURES]) -> Result<u32, DomainError> {
        let predictions = self.predict_rows(std::iter::once(features))?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| DomainError::training("Random forest returned no prediction"))
    }

    /// Fraction of `samples[rows]` predicted correctly
    pub fn accuracy(&self, samples: &[Sample], rows: &[usize]) -> Result<f64, DomainError> {
        if rows.is_empty() {
            return Ok(0.0);
        }

        let predicted = self.predict_rows(rows.iter().map(|&r| &samples[r].features))?;
        let correct = rows
            .iter()
            .zip(&predicted)
            .filter(|&(&r, &label)| samples[r].label == label)
            .count();

        Ok(correct as f64 / rows.len() as f64)
    }

    fn predict_rows<'a>(
        &self,
        rows: impl Iterator<Item = &'a [f64; N_FEATURES]>,
    ) -> Result<Vec<u32>, DomainError> {
        self.model
            .predict(&feature_matrix(rows))
            .map_err(|e| DomainError::training(format!("Random forest predict failed: {}", e)))
    }
}

fn feature_matrix<'a>(rows: impl Iterator<Item = &'a [f64; N_FEATURES]>) -> DenseMatrix<f64> {
    let values: Vec<Vec<f64>> = rows.map(|features| features.to_vec()).collect();
    DenseMatrix::from_2d_vec(&values)
}
