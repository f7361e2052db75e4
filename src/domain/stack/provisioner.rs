use async_trait::async_trait;
use std::fmt::Debug;

use super::{StackDescription, StackSpec};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Trait for stack provisioning backends (CloudFormation, test doubles)
///
/// Implementations translate backend failures into structured kinds:
/// an unknown stack is [`DomainError::StackNotFound`] and an update with
/// nothing to change is [`DomainError::NoUpdates`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StackProvisioner: Send + Sync + Debug {
    /// Describe the current state of a stack
    async fn describe_stack(&self, stack_name: &str) -> Result<StackDescription, DomainError>;

    /// Start creating a stack, returning its stack id
    async fn create_stack(&self, spec: &StackSpec) -> Result<String, DomainError>;

    /// Start updating a stack, returning its stack id
    async fn update_stack(&self, spec: &StackSpec) -> Result<String, DomainError>;

    /// Get provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}
