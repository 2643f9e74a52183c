//! Caller-facing deployment result

use crate::error::CloudError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Message used for errors whose details must not reach the caller
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Something unexpected has occurred";

/// Result of a deploy or remove operation
///
/// Serializes as `{"status":"ok","message":..,"outputs":{..}}` or
/// `{"status":"error","message":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeploymentResult {
    Ok {
        message: String,
        outputs: BTreeMap<String, String>,
    },
    Error {
        message: String,
    },
}

impl DeploymentResult {
    pub fn ok(message: impl Into<String>, outputs: BTreeMap<String, String>) -> Self {
        Self::Ok {
            message: message.into(),
            outputs,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Recognized errors keep their message, opaque ones are replaced
    pub fn from_error(error: &CloudError) -> Self {
        match error {
            CloudError::Other(_) => Self::error(UNEXPECTED_ERROR_MESSAGE),
            other => Self::error(other.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Ok { message, .. } | Self::Error { message } => message,
        }
    }

    pub fn outputs(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Ok { outputs, .. } => Some(outputs),
            Self::Error { .. } => None,
        }
    }
}
