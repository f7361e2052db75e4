//! Deploy orchestration domain

mod request;
mod response;
mod template;
mod wait;

pub use request::{
    coerce_parameter_value, DeployEvent, DeployRequest, SingleStackRequest,
    DEFAULT_INFRA_STACK_NAME, FORWARDED_OUTPUT_KEYS, LOG_GROUP_OUTPUT_KEY, ROLE_OUTPUT_KEY,
};
pub use response::{DeployResponse, HandlerResponse};
pub use template::resolve_template_url;
pub use wait::{PollConfig, WaitStrategy};
