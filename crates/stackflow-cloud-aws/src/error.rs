//! AWS provider error types

use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use stackflow_cloud::CloudError;
use thiserror::Error;

/// Error codes AWS returns for missing or rejected credentials
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
];

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Stack does not exist: {0}")]
    StackNotFound(String),

    #[error("Stack already exists: {0}")]
    StackAlreadyExists(String),

    #[error("No updates are to be performed")]
    NoUpdates,

    #[error("AWS authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Output not found: {0}")]
    OutputNotFound(String),

    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("AWS request could not be sent: {0}")]
    Dispatch(String),

    #[error("AWS SDK error: {0}")]
    Sdk(String),
}

impl AwsError {
    /// Classify a service error by its code and message
    ///
    /// CloudFormation reports a missing stack as a generic `ValidationError`,
    /// so the message text is the only signal for it.
    pub fn from_service(code: Option<&str>, message: Option<&str>) -> Self {
        let code = code.unwrap_or("Unknown").to_string();
        let message = message.unwrap_or_default().to_string();

        if message.contains("does not exist") {
            AwsError::StackNotFound(message)
        } else if code == "AlreadyExistsException" {
            AwsError::StackAlreadyExists(message)
        } else if message.contains("No updates are to be performed") {
            AwsError::NoUpdates
        } else if AUTH_ERROR_CODES.contains(&code.as_str()) {
            AwsError::AuthenticationFailed(message)
        } else {
            AwsError::Api { code, message }
        }
    }
}

impl<E, R> From<SdkError<E, R>> for AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(err: SdkError<E, R>) -> Self {
        let context = DisplayErrorContext(&err).to_string();
        match err {
            SdkError::ServiceError(service) => {
                let e = service.err();
                AwsError::from_service(e.code(), e.message())
            }
            SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => AwsError::Dispatch(context),
            _ => AwsError::Sdk(context),
        }
    }
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::StackNotFound(message) => CloudError::StackNotFound(message),
            AwsError::AuthenticationFailed(message) => CloudError::AuthenticationFailed(message),
            AwsError::OutputNotFound(name) => CloudError::OutputNotFound(name),
            AwsError::Api { message, .. } => CloudError::ApiError(message),
            e @ (AwsError::StackAlreadyExists(_) | AwsError::NoUpdates | AwsError::Dispatch(_)) => {
                CloudError::ApiError(e.to_string())
            }
            AwsError::Sdk(context) => CloudError::Other(anyhow::anyhow!(context)),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// "does not exist" becomes StackNotFound
    #[test]
    fn test_missing_stack_is_recognized() {
        let err = AwsError::from_service(
            Some("ValidationError"),
            Some("Stack with id my-appdev does not exist"),
        );
        assert!(matches!(err, AwsError::StackNotFound(_)));
        assert!(CloudError::from(err).is_stack_not_found());
    }

    /// Create conflicts and empty updates get their own variants
    #[test]
    fn test_create_conflict_and_no_updates() {
        let err = AwsError::from_service(
            Some("AlreadyExistsException"),
            Some("Stack [my-appdev] already exists"),
        );
        assert!(matches!(err, AwsError::StackAlreadyExists(_)));

        let err = AwsError::from_service(
            Some("ValidationError"),
            Some("No updates are to be performed."),
        );
        assert!(matches!(err, AwsError::NoUpdates));
    }

    /// Credential error codes map to AuthenticationFailed
    #[test]
    fn test_auth_codes() {
        let err = AwsError::from_service(
            Some("ExpiredToken"),
            Some("The security token included in the request is expired"),
        );
        assert!(matches!(err, AwsError::AuthenticationFailed(_)));
    }

    /// Other service errors keep the provider message
    #[test]
    fn test_api_error_keeps_provider_message() {
        let err = AwsError::from_service(
            Some("ValidationError"),
            Some("Template format error: JSON not well-formed."),
        );
        match CloudError::from(err) {
            CloudError::ApiError(message) => {
                assert_eq!(message, "Template format error: JSON not well-formed.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Unclassified SDK failures become opaque errors
    #[test]
    fn test_unclassified_sdk_error_is_opaque() {
        let err = CloudError::from(AwsError::Sdk("failed to construct request".to_string()));
        assert!(matches!(err, CloudError::Other(_)));
    }
}
