//! AWS CloudFormation provider implementation

use crate::cloudformation::CloudFormation;
use crate::error::AwsError;
use async_trait::async_trait;
use stackflow_cloud::{Resource, StackProvider, StackStatus, StatusResponse};
use std::collections::BTreeMap;

/// Map a raw CloudFormation stack status onto the four polling states
///
/// - `*_IN_PROGRESS` (including `*_CLEANUP_IN_PROGRESS`) → in progress
/// - `ROLLBACK_COMPLETE`, `UPDATE_ROLLBACK_COMPLETE`, ... → rollback
/// - `*_FAILED` → fail
/// - `*_COMPLETE` → success
/// - anything else → in progress
pub fn classify_stack_status(raw: &str) -> StackStatus {
    if raw.ends_with("_IN_PROGRESS") {
        StackStatus::InProgress
    } else if raw.ends_with("_COMPLETE") && raw.contains("ROLLBACK") {
        StackStatus::Rollback
    } else if raw.ends_with("_FAILED") {
        StackStatus::Fail
    } else if raw.ends_with("_COMPLETE") {
        StackStatus::Success
    } else {
        StackStatus::InProgress
    }
}

/// CloudFormation-backed stack provider
#[derive(Default)]
pub struct AwsStackProvider {
    cloudformation: CloudFormation,
}

impl AwsStackProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StackProvider for AwsStackProvider {
    fn name(&self) -> &str {
        "aws-cloudformation"
    }

    async fn start_stack_change(
        &self,
        stack: &str,
        region: &str,
        template: &str,
    ) -> stackflow_cloud::Result<()> {
        match self.cloudformation.create_stack(region, stack, template).await {
            Ok(()) => {
                tracing::info!("Creating stack {}", stack);
                Ok(())
            }
            Err(AwsError::StackAlreadyExists(_)) => {
                match self.cloudformation.update_stack(region, stack, template).await {
                    Ok(()) => {
                        tracing::info!("Updating stack {}", stack);
                        Ok(())
                    }
                    Err(AwsError::NoUpdates) => {
                        tracing::info!("Stack {} is already up to date", stack);
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_stack(&self, stack: &str, region: &str) -> stackflow_cloud::Result<()> {
        // DeleteStack succeeds for unknown names, so check existence first.
        self.cloudformation.describe_stack(region, stack).await?;
        self.cloudformation.delete_stack(region, stack).await?;
        tracing::info!("Deleting stack {}", stack);
        Ok(())
    }

    async fn query_status(
        &self,
        stack: &str,
        region: &str,
    ) -> stackflow_cloud::Result<StatusResponse> {
        let info = self.cloudformation.describe_stack(region, stack).await?;
        let resources = self
            .cloudformation
            .describe_stack_resources(region, stack)
            .await?
            .into_iter()
            .map(|r| Resource::new(r.logical_id, r.status))
            .collect();

        let status = classify_stack_status(&info.status);
        tracing::debug!("{} is {} ({})", stack, info.status, status);

        Ok(StatusResponse::new(status).with_resources(resources))
    }

    async fn fetch_outputs(
        &self,
        stack: &str,
        region: &str,
        names: &[String],
    ) -> stackflow_cloud::Result<BTreeMap<String, String>> {
        let info = self.cloudformation.describe_stack(region, stack).await?;
        let outputs = select_outputs(&info.outputs, names)?;
        Ok(outputs)
    }
}

/// Pick exactly the requested outputs
fn select_outputs(
    available: &std::collections::HashMap<String, String>,
    names: &[String],
) -> Result<BTreeMap<String, String>, AwsError> {
    names
        .iter()
        .map(|name| {
            available
                .get(name)
                .map(|value| (name.clone(), value.clone()))
                .ok_or_else(|| AwsError::OutputNotFound(name.clone()))
        })
        .collect()
}
