//! Model training domain

mod artifact;
mod dataset;
mod forest;
mod split;

pub use artifact::{ModelArtifact, MODEL_FILE_NAME};
pub use dataset::{ColumnLayout, Dataset, Sample, FEATURE_COLUMNS, N_FEATURES, TARGET_COLUMN};
pub use forest::{ForestConfig, RandomForest};
pub use split::{train_test_split, TrainTestSplit};
