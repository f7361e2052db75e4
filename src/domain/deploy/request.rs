//! Invocation payloads accepted by the deploy handler

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::template::resolve_template_url;
use crate::domain::stack::StackSpec;
use crate::domain::DomainError;

/// Infra output holding the Step Functions log group ARN
pub const LOG_GROUP_OUTPUT_KEY: &str = "StepFnLogGroupArn";

/// Infra output holding the Step Functions execution role ARN
pub const ROLE_OUTPUT_KEY: &str = "RoleStepFunctionsArn";

/// Infra outputs injected into the pipeline parameters, under the same names
pub const FORWARDED_OUTPUT_KEYS: [&str; 2] = [LOG_GROUP_OUTPUT_KEY, ROLE_OUTPUT_KEY];

pub const DEFAULT_INFRA_STACK_NAME: &str = "iris-mlops-infra";

fn default_infra_stack_name() -> String {
    DEFAULT_INFRA_STACK_NAME.to_string()
}

/// Two-stack deploy request: infra first, then the pipeline that consumes its outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployRequest {
    #[serde(default = "default_infra_stack_name")]
    pub infra_stack_name: String,
    pub pipeline_stack_name: String,
    pub infra_template_s3: String,
    pub pipeline_template_s3: String,
    #[serde(deserialize_with = "deserialize_parameters")]
    pub infra_parameters: BTreeMap<String, String>,
    #[serde(deserialize_with = "deserialize_parameters")]
    pub pipeline_parameters: BTreeMap<String, String>,
    pub capabilities: Vec<String>,
}

impl DeployRequest {
    pub fn infra_spec(&self) -> Result<StackSpec, DomainError> {
        build_spec(
            &self.infra_stack_name,
            &self.infra_template_s3,
            &self.infra_parameters,
            &self.capabilities,
        )
    }

    /// Pipeline spec with the infra outputs merged over the caller's parameters
    pub fn pipeline_spec(
        &self,
        infra_outputs: &BTreeMap<String, String>,
    ) -> Result<StackSpec, DomainError> {
        let mut parameters = self.pipeline_parameters.clone();
        parameters.extend(infra_outputs.iter().map(|(k, v)| (k.clone(), v.clone())));

        build_spec(
            &self.pipeline_stack_name,
            &self.pipeline_template_s3,
            &parameters,
            &self.capabilities,
        )
    }
}

/// Single-stack deploy request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SingleStackRequest {
    pub stack_name: String,
    #[serde(rename = "TemplateS3")]
    pub template_s3: String,
    #[serde(default, deserialize_with = "deserialize_parameters")]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl SingleStackRequest {
    pub fn spec(&self) -> Result<StackSpec, DomainError> {
        build_spec(
            &self.stack_name,
            &self.template_s3,
            &self.parameters,
            &self.capabilities,
        )
    }
}

/// Any payload the handler accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    Pipeline(DeployRequest),
    Single(SingleStackRequest),
}

impl DeployEvent {
    /// Detect the payload shape and parse it
    ///
    /// Events carrying both `StackName` and `TemplateS3` are single-stack
    /// requests; everything else is parsed as a two-stack request so that
    /// missing fields are reported by name.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        let is_single = value
            .as_object()
            .map(|o| o.contains_key("StackName") && o.contains_key("TemplateS3"))
            .ok_or_else(|| DomainError::validation("Event must be a JSON object"))?;

        if is_single {
            serde_json::from_value(value)
                .map(Self::Single)
                .map_err(|e| DomainError::validation(format!("Invalid event: {}", e)))
        } else {
            serde_json::from_value(value)
                .map(Self::Pipeline)
                .map_err(|e| DomainError::validation(format!("Invalid event: {}", e)))
        }
    }
}

fn build_spec(
    name: &str,
    template_location: &str,
    parameters: &BTreeMap<String, String>,
    capabilities: &[String],
) -> Result<StackSpec, DomainError> {
    let template_url = resolve_template_url(template_location)?;

    Ok(StackSpec::new(name, template_url)?
        .with_parameters(parameters)
        .with_capabilities(capabilities.to_vec()))
}

/// Render a parameter value as the string the provisioning service receives
pub fn coerce_parameter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn deserialize_parameters<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .map(|(k, v)| (k.clone(), coerce_parameter_value(v)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pipeline_event() -> Value {
        json!({
            "PipelineStackName": "iris-mlops-pipeline",
            "InfraTemplateS3": "s3://iris-bucket/infra.yaml",
            "PipelineTemplateS3": "s3://iris-bucket/pipeline.yaml",
            "InfraParameters": {"ProjectName": "iris-mlops"},
            "PipelineParameters": {"ProjectName": "iris-mlops", "InstanceCount": 2},
            "Capabilities": ["CAPABILITY_NAMED_IAM"]
        })
    }

    #[test]
    fn test_pipeline_event_defaults_infra_name() {
        let event = DeployEvent::from_value(pipeline_event()).unwrap();
        match event {
            DeployEvent::Pipeline(request) => {
                assert_eq!(request.infra_stack_name, DEFAULT_INFRA_STACK_NAME);
                assert_eq!(request.pipeline_parameters["InstanceCount"], "2");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_single_stack_event_is_detected() {
        let event = DeployEvent::from_value(json!({
            "StackName": "iris-mlops-infra",
            "TemplateS3": "s3://iris-bucket/infra.yaml"
        }))
        .unwrap();

        match event {
            DeployEvent::Single(request) => {
                assert!(request.parameters.is_empty());
                assert!(request.capabilities.is_empty());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut value = pipeline_event();
        value.as_object_mut().unwrap().remove("PipelineStackName");

        let err = DeployEvent::from_value(value).unwrap_err();
        assert!(err.to_string().contains("PipelineStackName"));
    }

    #[test]
    fn test_non_object_event_is_rejected() {
        assert!(DeployEvent::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_parameter_coercion() {
        assert_eq!(coerce_parameter_value(&json!("abc")), "abc");
        assert_eq!(coerce_parameter_value(&json!(3)), "3");
        assert_eq!(coerce_parameter_value(&json!(1.5)), "1.5");
        assert_eq!(coerce_parameter_value(&json!(true)), "true");
        assert_eq!(coerce_parameter_value(&Value::Null), "");
    }

    #[test]
    fn test_pipeline_spec_merges_outputs() {
        let DeployEvent::Pipeline(request) = DeployEvent::from_value(pipeline_event()).unwrap()
        else {
            panic!("expected pipeline event");
        };

        let mut outputs = BTreeMap::new();
        outputs.insert(ROLE_OUTPUT_KEY.to_string(), "arn:role".to_string());
        outputs.insert(LOG_GROUP_OUTPUT_KEY.to_string(), "arn:logs".to_string());

        let spec = request.pipeline_spec(&outputs).unwrap();
        let keys: Vec<&str> = spec
            .parameters()
            .iter()
            .map(|p| p.parameter_key.as_str())
            .collect();

        assert_eq!(
            keys,
            vec![
                "InstanceCount",
                "ProjectName",
                "RoleStepFunctionsArn",
                "StepFnLogGroupArn"
            ]
        );
        assert_eq!(
            spec.template_url(),
            "https://s3.amazonaws.com/iris-bucket/pipeline.yaml"
        );
        // caller's map is untouched
        assert!(!request.pipeline_parameters.contains_key(ROLE_OUTPUT_KEY));
    }
}
