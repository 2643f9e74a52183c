//! Stack deployment error types

use thiserror::Error;

/// Errors raised while driving a stack change
#[derive(Error, Debug)]
pub enum CloudError {
    /// The stack is not known to the provider
    #[error("Stack {0} does not exist")]
    StackNotFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("{0}")]
    ApiError(String),

    #[error("{0}")]
    DeploymentFailed(String),

    #[error("{0}")]
    RolledBack(String),

    #[error("{0}")]
    StillInProgress(String),

    #[error("Output not found: {0}")]
    OutputNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything an adapter could not classify. Its message is never shown to
    /// the caller of `deploy`/`remove`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CloudError {
    /// Whether this error means the stack is already gone
    pub fn is_stack_not_found(&self) -> bool {
        matches!(self, CloudError::StackNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
