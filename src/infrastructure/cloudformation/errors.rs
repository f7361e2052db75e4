//! Mapping of CloudFormation failures onto domain error kinds
//!
//! CloudFormation reports both "stack does not exist" and "no updates are to
//! be performed" under the generic `ValidationError` code, so the message text
//! still has to be inspected. The code is checked first; the rendered error is
//! only searched when the service returned no code at all (transport failures,
//! unmodeled responses).

use aws_sdk_cloudformation::error::ProvideErrorMetadata;
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::domain::DomainError;

const VALIDATION_ERROR_CODE: &str = "ValidationError";
const STACK_NOT_FOUND_TEXT: &str = "does not exist";
const NO_UPDATES_TEXT: &str = "No updates are to be performed";

/// Classify an SDK error raised while operating on `stack`
pub fn classify_sdk_error<E>(stack: &str, err: E) -> DomainError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let detail = DisplayErrorContext(&err).to_string();
    classify_error(stack, err.code(), err.message(), &detail)
}

/// Classify from the raw pieces of an error
pub fn classify_error(
    stack: &str,
    code: Option<&str>,
    message: Option<&str>,
    detail: &str,
) -> DomainError {
    match code {
        Some(VALIDATION_ERROR_CODE) => {
            let message = message.unwrap_or(detail);
            match_known_message(stack, message)
                .unwrap_or_else(|| DomainError::provisioning(VALIDATION_ERROR_CODE, message))
        }
        Some(code) => DomainError::provisioning(code, message.unwrap_or(detail)),
        None => match_known_message(stack, detail)
            .unwrap_or_else(|| DomainError::provisioning("Unknown", detail)),
    }
}

fn match_known_message(stack: &str, message: &str) -> Option<DomainError> {
    if message.contains(NO_UPDATES_TEXT) {
        Some(DomainError::no_updates(stack))
    } else if message.contains(STACK_NOT_FOUND_TEXT) {
        Some(DomainError::stack_not_found(stack))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_for_missing_stack() {
        let err = classify_error(
            "iris-mlops-infra",
            Some("ValidationError"),
            Some("Stack with id iris-mlops-infra does not exist"),
            "",
        );
        assert!(matches!(err, DomainError::StackNotFound { ref stack } if stack == "iris-mlops-infra"));
    }

    #[test]
    fn test_validation_error_for_no_updates() {
        let err = classify_error(
            "iris-mlops-pipeline",
            Some("ValidationError"),
            Some("No updates are to be performed."),
            "",
        );
        assert!(matches!(err, DomainError::NoUpdates { .. }));
    }

    #[test]
    fn test_other_validation_error_is_provisioning() {
        let err = classify_error(
            "infra",
            Some("ValidationError"),
            Some("Template format error: unsupported structure."),
            "",
        );
        match err {
            DomainError::Provisioning { code, message } => {
                assert_eq!(code, "ValidationError");
                assert!(message.starts_with("Template format error"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_other_codes_are_not_reinterpreted() {
        let err = classify_error(
            "infra",
            Some("AccessDenied"),
            Some("User is not authorized; resource does not exist in account"),
            "",
        );
        assert!(matches!(err, DomainError::Provisioning { ref code, .. } if code == "AccessDenied"));
    }

    #[test]
    fn test_fallback_to_rendered_error_without_code() {
        let err = classify_error(
            "infra",
            None,
            None,
            "service error: Stack with id infra does not exist",
        );
        assert!(matches!(err, DomainError::StackNotFound { .. }));

        let err = classify_error("infra", None, None, "dispatch failure: connection refused");
        assert!(matches!(err, DomainError::Provisioning { ref code, .. } if code == "Unknown"));
    }
}
