//! Infrastructure layer - External service implementations

pub mod cloudformation;
pub mod dataset;
pub mod logging;
pub mod model_store;
pub mod services;
