//! CLI module for Iris MLOps
//!
//! Provides subcommands for the deploy handler and the training jobs:
//! - `deploy`: deploy the infra and pipeline stacks with local defaults
//! - `invoke`: run the deploy handler on an event document
//! - `preprocess`: write the processed Iris dataset
//! - `train`: train and persist the random forest model

pub mod deploy;
pub mod invoke;
pub mod preprocess;
pub mod train;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Iris MLOps - stack orchestration and model training jobs
#[derive(Parser)]
#[command(name = "iris-mlops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy the infra and pipeline stacks from S3 templates
    Deploy(deploy::DeployArgs),

    /// Run the deploy handler on an event read from a file or stdin
    Invoke(invoke::InvokeArgs),

    /// Write the processed Iris dataset as CSV
    Preprocess(preprocess::PreprocessArgs),

    /// Train the random forest and write `model.json` (JSON, not joblib)
    Train(train::TrainArgs),
}

/// Load `.env` and configuration, then start logging
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    };
    logging::init_logging(&config.logging);

    config
}
