//! Stack provisioning domain

mod entity;
mod outcome;
mod provisioner;
mod status;

pub use entity::{StackDescription, StackParameter, StackSpec};
pub use outcome::DeployOutcome;
pub use provisioner::StackProvisioner;
pub use status::{StackPhase, StackStatus};

#[cfg(test)]
pub use provisioner::mock;
#[cfg(test)]
pub use provisioner::MockStackProvisioner;
