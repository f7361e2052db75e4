//! Layered application configuration

mod app_config;

pub use app_config::{AppConfig, DeployConfig, LogFormat, LoggingConfig, TrainingConfig};
