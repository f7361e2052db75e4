//! CloudFormation adapter

mod client;
mod errors;

pub use client::CloudFormationProvisioner;
pub use errors::{classify_error, classify_sdk_error};
