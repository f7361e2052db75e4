//! AWS CloudFormation stack provisioner

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_cloudformation::types::{Capability, Parameter, Stack};
use aws_sdk_cloudformation::Client as CloudFormationClient;
use tracing::debug;

use super::errors::classify_sdk_error;
use crate::domain::{DomainError, StackDescription, StackProvisioner, StackSpec};

/// Provisioner backed by the CloudFormation API
#[derive(Debug, Clone)]
pub struct CloudFormationProvisioner {
    client: CloudFormationClient,
}

impl CloudFormationProvisioner {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: CloudFormationClient::new(config),
        }
    }

    pub fn from_client(client: CloudFormationClient) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential/region chain
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let config = loader.load().await;
        Self::new(&config)
    }

    fn parameters(spec: &StackSpec) -> Vec<Parameter> {
        spec.parameters()
            .iter()
            .map(|p| {
                Parameter::builder()
                    .parameter_key(&p.parameter_key)
                    .parameter_value(&p.parameter_value)
                    .build()
            })
            .collect()
    }

    fn capabilities(spec: &StackSpec) -> Vec<Capability> {
        spec.capabilities()
            .iter()
            .map(|c| Capability::from(c.as_str()))
            .collect()
    }

    fn to_description(stack_name: &str, stack: &Stack) -> StackDescription {
        let status = stack
            .stack_status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default();

        let mut description =
            StackDescription::new(stack.stack_id().unwrap_or_default(), stack_name, status);

        if let Some(reason) = stack.stack_status_reason() {
            description = description.with_status_reason(reason);
        }

        description.outputs = stack
            .outputs()
            .iter()
            .filter_map(|o| Some((o.output_key()?.to_string(), o.output_value()?.to_string())))
            .collect::<HashMap<_, _>>();

        description
    }
}

#[async_trait]
impl StackProvisioner for CloudFormationProvisioner {
    async fn describe_stack(&self, stack_name: &str) -> Result<StackDescription, DomainError> {
        let response = self
            .client
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|e| classify_sdk_error(stack_name, e))?;

        let stack = response
            .stacks()
            .first()
            .ok_or_else(|| DomainError::stack_not_found(stack_name))?;

        let description = Self::to_description(stack_name, stack);
        debug!(
            stack = stack_name,
            status = %description.status,
            outputs = description.outputs.len(),
            "Described stack"
        );

        Ok(description)
    }

    async fn create_stack(&self, spec: &StackSpec) -> Result<String, DomainError> {
        let response = self
            .client
            .create_stack()
            .stack_name(spec.name())
            .template_url(spec.template_url())
            .set_parameters(Some(Self::parameters(spec)))
            .set_capabilities(Some(Self::capabilities(spec)))
            .send()
            .await
            .map_err(|e| classify_sdk_error(spec.name(), e))?;

        response
            .stack_id()
            .map(|id| id.to_string())
            .ok_or_else(|| {
                DomainError::provisioning("MissingStackId", "CreateStack returned no stack id")
            })
    }

    async fn update_stack(&self, spec: &StackSpec) -> Result<String, DomainError> {
        let response = self
            .client
            .update_stack()
            .stack_name(spec.name())
            .template_url(spec.template_url())
            .set_parameters(Some(Self::parameters(spec)))
            .set_capabilities(Some(Self::capabilities(spec)))
            .send()
            .await
            .map_err(|e| classify_sdk_error(spec.name(), e))?;

        response
            .stack_id()
            .map(|id| id.to_string())
            .ok_or_else(|| {
                DomainError::provisioning("MissingStackId", "UpdateStack returned no stack id")
            })
    }

    fn provider_name(&self) -> &'static str {
        "cloudformation"
    }
}
