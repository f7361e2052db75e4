//! Domain layer - Core business logic and entities

pub mod deploy;
pub mod error;
pub mod stack;
pub mod training;

pub use deploy::{
    DeployEvent, DeployRequest, DeployResponse, HandlerResponse, PollConfig, SingleStackRequest,
    WaitStrategy,
};
pub use error::DomainError;
pub use stack::{
    DeployOutcome, StackDescription, StackParameter, StackPhase, StackProvisioner, StackSpec,
    StackStatus,
};
pub use training::{
    Dataset, ForestConfig, ModelArtifact, RandomForest, Sample, FEATURE_COLUMNS, MODEL_FILE_NAME,
    TARGET_COLUMN,
};
