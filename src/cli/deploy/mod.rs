//! Deploy command - two-stack deploy with locally configured parameters

use std::collections::BTreeMap;

use clap::Args;

use crate::config::DeployConfig;
use crate::domain::DeployRequest;

use super::invoke::{build_service, print_json};

/// Arguments for the deploy command
#[derive(Args, Clone)]
pub struct DeployArgs {
    /// S3 location of the infra template (s3://bucket/key)
    #[arg(long)]
    pub infra_template: String,

    /// S3 location of the pipeline template (s3://bucket/key)
    #[arg(long)]
    pub pipeline_template: String,

    /// Bucket the pipeline stores its artifacts in
    #[arg(long)]
    pub bucket: String,
}

pub async fn run(args: DeployArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let request = local_request(&config.deploy, &args);
    let service = build_service(&config.deploy).await;

    let response = service.handle_request(&request).await;
    print_json(&response)?;

    if response.is_error() {
        anyhow::bail!("Deploy failed");
    }
    Ok(())
}

/// Build the two-stack request from configuration and command arguments
pub fn local_request(config: &DeployConfig, args: &DeployArgs) -> DeployRequest {
    let infra_parameters = BTreeMap::from([
        ("ProjectName".to_string(), config.project_name.clone()),
        ("SageMakerRoleArn".to_string(), config.sagemaker_role_arn.clone()),
    ]);

    let pipeline_parameters = BTreeMap::from([
        ("ProjectName".to_string(), config.project_name.clone()),
        ("ECRImageURI".to_string(), config.ecr_image_uri.clone()),
        ("S3BucketName".to_string(), args.bucket.clone()),
        ("SageMakerRoleArn".to_string(), config.sagemaker_role_arn.clone()),
    ]);

    DeployRequest {
        infra_stack_name: config.infra_stack_name.clone(),
        pipeline_stack_name: config.pipeline_stack_name.clone(),
        infra_template_s3: args.infra_template.clone(),
        pipeline_template_s3: args.pipeline_template.clone(),
        infra_parameters,
        pipeline_parameters,
        capabilities: config.capabilities.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_request_uses_configured_defaults() {
        let args = DeployArgs {
            infra_template: "s3://iris-bucket/infra.yaml".to_string(),
            pipeline_template: "s3://iris-bucket/pipeline.yaml".to_string(),
            bucket: "iris-artifacts".to_string(),
        };

        let request = local_request(&DeployConfig::default(), &args);

        assert_eq!(request.infra_stack_name, "iris-mlops-infra");
        assert_eq!(request.pipeline_stack_name, "iris-mlops-pipeline");
        assert_eq!(request.infra_parameters["ProjectName"], "iris-mlops");
        assert!(!request.infra_parameters.contains_key("S3BucketName"));
        assert_eq!(request.pipeline_parameters["S3BucketName"], "iris-artifacts");
        assert!(request.pipeline_parameters["ECRImageURI"].contains(".dkr.ecr."));
        assert_eq!(request.capabilities, vec!["CAPABILITY_NAMED_IAM"]);

        let spec = request.infra_spec().unwrap();
        assert_eq!(spec.template_url(), "https://s3.amazonaws.com/iris-bucket/infra.yaml");
    }
}
