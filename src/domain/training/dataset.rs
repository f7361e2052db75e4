//! Tabular training dataset

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Number of numeric feature columns
pub const N_FEATURES: usize = 4;

/// Feature column names, in CSV order
pub const FEATURE_COLUMNS: [&str; N_FEATURES] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

/// Label column name
pub const TARGET_COLUMN: &str = "target";

/// One labelled row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: [f64; N_FEATURES],
    pub label: u32,
}

impl Sample {
    pub fn new(features: [f64; N_FEATURES], label: u32) -> Self {
        Self { features, label }
    }
}

/// In-memory dataset with the fixed four-feature schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of columns when written out (features + label)
    pub fn n_columns(&self) -> usize {
        N_FEATURES + 1
    }

    /// Number of distinct labels
    pub fn n_classes(&self) -> usize {
        self.samples
            .iter()
            .map(|s| s.label)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Header row, label last
    pub fn header() -> Vec<&'static str> {
        FEATURE_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once(TARGET_COLUMN))
            .collect()
    }
}

/// Column positions of the required fields within a CSV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub features: [usize; N_FEATURES],
    pub target: usize,
}

impl ColumnLayout {
    /// Locate every required column; extra columns are ignored
    pub fn resolve<S: AsRef<str>>(header: &[S]) -> Result<Self, DomainError> {
        let position = |name: &str| header.iter().position(|h| h.as_ref().trim() == name);
        let found = || header.iter().map(|h| h.as_ref().to_string()).collect::<Vec<_>>();

        let mut features = [0usize; N_FEATURES];
        for (slot, name) in features.iter_mut().zip(FEATURE_COLUMNS) {
            *slot = position(name)
                .ok_or_else(|| DomainError::schema_validation(FEATURE_COLUMNS, found()))?;
        }

        let target = position(TARGET_COLUMN).ok_or_else(|| {
            DomainError::schema_validation(Dataset::header(), found())
        })?;

        Ok(Self { features, target })
    }
}
