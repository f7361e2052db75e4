//! Template location resolution

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Matches `s3://bucket/key`, capturing bucket and key
static S3_URI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^s3://([^/]+)/(.+)$").expect("valid S3 URI pattern"));

const S3_HTTPS_ENDPOINT: &str = "https://s3.amazonaws.com";

/// Turn a template location into the HTTPS URL the provisioning service expects
///
/// `s3://bucket/key` becomes `https://s3.amazonaws.com/bucket/key`; HTTPS URLs
/// are returned unchanged.
pub fn resolve_template_url(location: &str) -> Result<String, DomainError> {
    let location = location.trim();

    if let Some(caps) = S3_URI_PATTERN.captures(location) {
        return Ok(format!("{}/{}/{}", S3_HTTPS_ENDPOINT, &caps[1], &caps[2]));
    }

    if location.starts_with("https://") {
        return Ok(location.to_string());
    }

    Err(DomainError::validation(format!(
        "Template location must be an s3:// or https:// URL, got '{}'",
        location
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_uri_is_rewritten() {
        let url = resolve_template_url("s3://iris-mlops-bucket/templates/infra.yaml").unwrap();
        assert_eq!(
            url,
            "https://s3.amazonaws.com/iris-mlops-bucket/templates/infra.yaml"
        );
    }

    #[test]
    fn test_https_passes_through() {
        let url = "https://iris.s3.eu-north-1.amazonaws.com/pipeline.yaml";
        assert_eq!(resolve_template_url(url).unwrap(), url);
    }

    #[test]
    fn test_bucket_without_key_is_rejected() {
        assert!(resolve_template_url("s3://bucket-only").is_err());
    }

    #[test]
    fn test_local_path_is_rejected() {
        let err = resolve_template_url("./templates/infra.yaml").unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
