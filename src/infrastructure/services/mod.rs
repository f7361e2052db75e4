//! Infrastructure services

mod deploy_service;
mod training_service;

pub use deploy_service::DeployService;
pub use training_service::{TrainingOutcome, TrainingService, PROCESSED_FILE_NAME};
