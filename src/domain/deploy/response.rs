//! Handler responses

use serde::{Deserialize, Serialize};

use crate::domain::stack::DeployOutcome;

/// Two-stack response: every outcome, or a single error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeployResponse {
    Ok { stacks: Vec<DeployOutcome> },
    Error { message: String },
}

impl DeployResponse {
    pub fn ok(stacks: Vec<DeployOutcome>) -> Self {
        Self::Ok { stacks }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Whatever the handler returns for a given event shape
///
/// Single-stack events answer with the bare outcome; failures of either
/// shape use the `{status: "error", message}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HandlerResponse {
    Stack(DeployOutcome),
    Deploy(DeployResponse),
}

impl HandlerResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Deploy(DeployResponse::error(message))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Deploy(response) if response.is_error())
    }
}
