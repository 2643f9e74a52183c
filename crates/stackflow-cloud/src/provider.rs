//! Stack provider trait definition

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Infrastructure provider abstraction trait
///
/// Implementations talk to the service that actually owns the stack
/// (CloudFormation for `stackflow-cloud-aws`). The orchestrator only ever
/// goes through this trait, so tests can script every response.
#[async_trait]
pub trait StackProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws-cloudformation")
    fn name(&self) -> &str;

    /// Create the stack, or update it when it already exists
    async fn start_stack_change(&self, stack: &str, region: &str, template: &str) -> Result<()>;

    /// Request deletion of the stack
    async fn remove_stack(&self, stack: &str, region: &str) -> Result<()>;

    /// Read the current stack status and, when available, its resources
    async fn query_status(&self, stack: &str, region: &str) -> Result<StatusResponse>;

    /// Read the named stack outputs
    async fn fetch_outputs(
        &self,
        stack: &str,
        region: &str,
        names: &[String],
    ) -> Result<BTreeMap<String, String>>;
}

/// Last observed state of one stack sub-resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Logical resource id
    pub id: String,

    /// Raw provider status (e.g., "CREATE_IN_PROGRESS")
    pub status: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }
}

/// Classified stack status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackStatus {
    Success,
    Fail,
    Rollback,
    #[serde(rename = "inprogress")]
    InProgress,
}

impl StackStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StackStatus::InProgress)
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackStatus::Success => write!(f, "success"),
            StackStatus::Fail => write!(f, "fail"),
            StackStatus::Rollback => write!(f, "rollback"),
            StackStatus::InProgress => write!(f, "inprogress"),
        }
    }
}

/// One answer to a status query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: StackStatus,

    /// Per-resource progress, if the provider reported any
    pub resources: Option<Vec<Resource>>,
}

impl StatusResponse {
    pub fn new(status: StackStatus) -> Self {
        Self {
            status,
            resources: None,
        }
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = Some(resources);
        self
    }
}
