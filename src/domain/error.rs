use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Stack {stack} does not exist")]
    StackNotFound { stack: String },

    #[error("No updates are to be performed on stack {stack}")]
    NoUpdates { stack: String },

    #[error("Provisioning error: {code} - {message}")]
    Provisioning { code: String, message: String },

    #[error("Stack {stack} has no output '{key}'")]
    MissingOutput { stack: String, key: String },

    #[error("Stack {stack} settled in failure state {status}{}", reason_suffix(.reason))]
    StackFailed {
        stack: String,
        status: String,
        reason: Option<String>,
    },

    #[error("Timed out waiting for stack {stack} after {attempts} attempts")]
    WaitTimeout { stack: String, attempts: u32 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    #[error("Expected feature columns {expected:?}. Found: {found:?}")]
    SchemaValidation {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Training error: {message}")]
    Training { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn stack_not_found(stack: impl Into<String>) -> Self {
        Self::StackNotFound {
            stack: stack.into(),
        }
    }

    pub fn no_updates(stack: impl Into<String>) -> Self {
        Self::NoUpdates {
            stack: stack.into(),
        }
    }

    pub fn provisioning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provisioning {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn missing_output(stack: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingOutput {
            stack: stack.into(),
            key: key.into(),
        }
    }

    pub fn stack_failed(
        stack: impl Into<String>,
        status: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self::StackFailed {
            stack: stack.into(),
            status: status.into(),
            reason,
        }
    }

    pub fn wait_timeout(stack: impl Into<String>, attempts: u32) -> Self {
        Self::WaitTimeout {
            stack: stack.into(),
            attempts,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    pub fn schema_validation<E, F>(expected: E, found: F) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self::SchemaValidation {
            expected: expected.into_iter().map(Into::into).collect(),
            found: found.into_iter().map(Into::into).collect(),
        }
    }

    pub fn training(message: impl Into<String>) -> Self {
        Self::Training {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {}", r))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_not_found_error() {
        let error = DomainError::stack_not_found("iris-mlops-infra");
        assert_eq!(error.to_string(), "Stack iris-mlops-infra does not exist");
    }

    #[test]
    fn test_missing_output_error() {
        let error = DomainError::missing_output("iris-mlops-infra", "StepFnLogGroupArn");
        assert_eq!(
            error.to_string(),
            "Stack iris-mlops-infra has no output 'StepFnLogGroupArn'"
        );
    }

    #[test]
    fn test_schema_validation_error_names_both_sides() {
        let error = DomainError::schema_validation(["a", "b"], vec!["c".to_string()]);
        assert_eq!(
            error.to_string(),
            r#"Expected feature columns ["a", "b"]. Found: ["c"]"#
        );
    }

    #[test]
    fn test_stack_failed_error_carries_reason() {
        let error = DomainError::stack_failed(
            "infra",
            "ROLLBACK_COMPLETE",
            Some("Resource creation cancelled".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "Stack infra settled in failure state ROLLBACK_COMPLETE: Resource creation cancelled"
        );

        let error = DomainError::stack_failed("infra", "CREATE_FAILED", None);
        assert_eq!(
            error.to_string(),
            "Stack infra settled in failure state CREATE_FAILED"
        );
    }

    #[test]
    fn test_wait_timeout_error() {
        let error = DomainError::wait_timeout("infra", 20);
        assert_eq!(
            error.to_string(),
            "Timed out waiting for stack infra after 20 attempts"
        );
    }
}
