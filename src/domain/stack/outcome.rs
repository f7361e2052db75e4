//! Result of deploying a single stack

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the orchestrator did to a stack
///
/// Reports that an action was started or skipped, never that it completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeployOutcome {
    /// The stack did not exist and a create was issued
    CreateStarted {
        #[serde(rename = "StackId")]
        stack_id: String,
    },
    /// The stack existed and an update was issued
    UpdateStarted {
        #[serde(rename = "StackId")]
        stack_id: String,
    },
    /// The stack existed and the update had nothing to change
    NoChange {
        #[serde(rename = "StackName")]
        stack_name: String,
    },
}

impl DeployOutcome {
    pub fn created(stack_id: impl Into<String>) -> Self {
        Self::CreateStarted {
            stack_id: stack_id.into(),
        }
    }

    pub fn updated(stack_id: impl Into<String>) -> Self {
        Self::UpdateStarted {
            stack_id: stack_id.into(),
        }
    }

    pub fn unchanged(stack_name: impl Into<String>) -> Self {
        Self::NoChange {
            stack_name: stack_name.into(),
        }
    }

    /// Status tag as it appears on the wire
    pub fn status(&self) -> &'static str {
        match self {
            Self::CreateStarted { .. } => "create_started",
            Self::UpdateStarted { .. } => "update_started",
            Self::NoChange { .. } => "no_change",
        }
    }

    pub fn stack_id(&self) -> Option<&str> {
        match self {
            Self::CreateStarted { stack_id } | Self::UpdateStarted { stack_id } => Some(stack_id),
            Self::NoChange { .. } => None,
        }
    }
}

impl fmt::Display for DeployOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateStarted { stack_id } | Self::UpdateStarted { stack_id } => {
                write!(f, "{}: {}", self.status(), stack_id)
            }
            Self::NoChange { stack_name } => write!(f, "{}: {}", self.status(), stack_name),
        }
    }
}
