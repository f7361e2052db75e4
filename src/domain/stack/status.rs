//! Stack status as reported by the provisioning service

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse lifecycle phase derived from a stack status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackPhase {
    /// An operation is still running on the stack
    InProgress,
    /// The last operation finished and the stack is usable
    Succeeded,
    /// An update was rolled back; the stack is usable with its previous outputs
    RolledBack,
    /// The last operation failed, or a create was rolled back
    Failed,
}

/// Raw stack status string, e.g. `CREATE_COMPLETE`
///
/// Kept as the service's own text so that statuses added to the service
/// later still round-trip; classification happens in [`StackStatus::phase`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackStatus(String);

const SUCCEEDED: &[&str] = &["CREATE_COMPLETE", "UPDATE_COMPLETE", "IMPORT_COMPLETE"];
const ROLLED_BACK: &[&str] = &["UPDATE_ROLLBACK_COMPLETE", "IMPORT_ROLLBACK_COMPLETE"];

impl StackStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn phase(&self) -> StackPhase {
        if self.0.ends_with("_IN_PROGRESS") {
            StackPhase::InProgress
        } else if SUCCEEDED.contains(&self.0.as_str()) {
            StackPhase::Succeeded
        } else if ROLLED_BACK.contains(&self.0.as_str()) {
            StackPhase::RolledBack
        } else {
            // *_FAILED, ROLLBACK_COMPLETE, DELETE_COMPLETE, ...
            StackPhase::Failed
        }
    }
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StackStatus {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StackStatus {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
