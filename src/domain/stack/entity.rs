//! Stack entities

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::StackStatus;
use crate::domain::DomainError;

/// A single template parameter as sent to the provisioning service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackParameter {
    pub parameter_key: String,
    pub parameter_value: String,
}

impl StackParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter_key: key.into(),
            parameter_value: value.into(),
        }
    }
}

/// Everything needed to create or update one stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSpec {
    name: String,
    template_url: String,
    parameters: Vec<StackParameter>,
    capabilities: Vec<String>,
}

impl StackSpec {
    /// Build a spec, validating the stack name and template URL are present
    pub fn new(
        name: impl Into<String>,
        template_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let template_url = template_url.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("Stack name cannot be empty"));
        }

        if template_url.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "Template URL for stack '{}' cannot be empty",
                name
            )));
        }

        Ok(Self {
            name,
            template_url,
            parameters: Vec::new(),
            capabilities: Vec::new(),
        })
    }

    /// Replace the parameter list, keeping the map's key order
    pub fn with_parameters(mut self, parameters: &BTreeMap<String, String>) -> Self {
        self.parameters = parameters
            .iter()
            .map(|(k, v)| StackParameter::new(k, v))
            .collect();
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template_url(&self) -> &str {
        &self.template_url
    }

    pub fn parameters(&self) -> &[StackParameter] {
        &self.parameters
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }
}

/// Current state of a stack as described by the provisioning service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackDescription {
    pub stack_id: String,
    pub stack_name: String,
    pub status: StackStatus,
    pub status_reason: Option<String>,
    pub outputs: HashMap<String, String>,
}

impl StackDescription {
    pub fn new(
        stack_id: impl Into<String>,
        stack_name: impl Into<String>,
        status: impl Into<StackStatus>,
    ) -> Self {
        Self {
            stack_id: stack_id.into(),
            stack_name: stack_name.into(),
            status: status.into(),
            status_reason: None,
            outputs: HashMap::new(),
        }
    }

    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }

    pub fn with_status_reason(mut self, reason: impl Into<String>) -> Self {
        self.status_reason = Some(reason.into());
        self
    }

    /// Look up a required output value
    pub fn require_output(&self, key: &str) -> Result<&str, DomainError> {
        self.outputs
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| DomainError::missing_output(&self.stack_name, key))
    }
}
