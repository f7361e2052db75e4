use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::deploy::DEFAULT_INFRA_STACK_NAME;
use crate::domain::WaitStrategy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub deploy: DeployConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Settings for the deploy handler and the local `deploy` command
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// AWS region override; the default provider chain is used when unset
    pub region: Option<String>,
    pub wait: WaitStrategy,
    pub infra_stack_name: String,
    pub pipeline_stack_name: String,
    pub project_name: String,
    pub sagemaker_role_arn: String,
    pub ecr_image_uri: String,
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub input_path: PathBuf,
    pub model_path: PathBuf,
    pub output_dir: PathBuf,
    pub n_estimators: usize,
    pub seed: u64,
    pub test_fraction: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            region: None,
            wait: WaitStrategy::default(),
            infra_stack_name: DEFAULT_INFRA_STACK_NAME.to_string(),
            pipeline_stack_name: "iris-mlops-pipeline".to_string(),
            project_name: "iris-mlops".to_string(),
            sagemaker_role_arn: "arn:aws:iam::182406535835:role/service-role/AmazonSageMaker-ExecutionRole-20251013T175169".to_string(),
            ecr_image_uri: "182406535835.dkr.ecr.eu-north-1.amazonaws.com/sagemaker-studio-d-x5rfkjrvcd2t:default-20251013T175168".to_string(),
            capabilities: vec!["CAPABILITY_NAMED_IAM".to_string()],
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("/opt/ml/input/data/train/processed.csv"),
            model_path: PathBuf::from("/opt/ml/model"),
            output_dir: PathBuf::from("./processed_output"),
            n_estimators: 20,
            seed: 42,
            test_fraction: 0.2,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.deploy.infra_stack_name, "iris-mlops-infra");
        assert_eq!(config.deploy.pipeline_stack_name, "iris-mlops-pipeline");
        assert_eq!(config.deploy.capabilities, vec!["CAPABILITY_NAMED_IAM"]);
        assert!(matches!(config.deploy.wait, WaitStrategy::Poll(_)));
        assert_eq!(config.training.n_estimators, 20);
        assert_eq!(config.training.model_path, PathBuf::from("/opt/ml/model"));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [logging]
                format = "json"

                [deploy.wait]
                mode = "fixed"
                delay_secs = 20

                [training]
                n_estimators = 50
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.deploy.wait, WaitStrategy::fixed(20));
        assert_eq!(config.deploy.project_name, "iris-mlops");
        assert_eq!(config.training.n_estimators, 50);
        assert_eq!(config.training.seed, 42);
    }
}
