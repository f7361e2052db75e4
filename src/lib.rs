//! Iris MLOps
//!
//! Deployment and training jobs for an Iris classification pipeline:
//! - Two-stack CloudFormation deploy (infra, then the pipeline that consumes its outputs)
//! - Dataset preprocessing to CSV
//! - Seeded random forest training with a persisted JSON model artifact

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
