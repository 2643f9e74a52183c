//! CloudFormation API wrapper
//!
//! Thin layer over the AWS SDK that keeps one client per region and turns
//! SDK shapes into plain structs.

use crate::error::{AwsError, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::types::{Capability, ResourceStatus, StackStatus};
use std::collections::HashMap;
use std::sync::Mutex;

/// CloudFormation client cache
#[derive(Default)]
pub struct CloudFormation {
    clients: Mutex<HashMap<String, Client>>,
}

impl CloudFormation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client for `region`, loading the shared AWS config on first use
    async fn client(&self, region: &str) -> Client {
        let cached = self
            .clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(region)
            .cloned();
        if let Some(client) = cached {
            return client;
        }

        tracing::debug!("Loading AWS config for {}", region);
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        let client = Client::new(&config);

        self.clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(region.to_string(), client.clone());
        client
    }

    /// Create a new stack
    pub async fn create_stack(&self, region: &str, name: &str, template: &str) -> Result<()> {
        tracing::debug!("CreateStack {} ({})", name, region);
        self.client(region)
            .await
            .create_stack()
            .stack_name(name)
            .template_body(template)
            .capabilities(Capability::CapabilityIam)
            .capabilities(Capability::CapabilityNamedIam)
            .capabilities(Capability::CapabilityAutoExpand)
            .send()
            .await?;
        Ok(())
    }

    /// Update an existing stack
    pub async fn update_stack(&self, region: &str, name: &str, template: &str) -> Result<()> {
        tracing::debug!("UpdateStack {} ({})", name, region);
        self.client(region)
            .await
            .update_stack()
            .stack_name(name)
            .template_body(template)
            .capabilities(Capability::CapabilityIam)
            .capabilities(Capability::CapabilityNamedIam)
            .capabilities(Capability::CapabilityAutoExpand)
            .send()
            .await?;
        Ok(())
    }

    /// Request stack deletion
    pub async fn delete_stack(&self, region: &str, name: &str) -> Result<()> {
        tracing::debug!("DeleteStack {} ({})", name, region);
        self.client(region)
            .await
            .delete_stack()
            .stack_name(name)
            .send()
            .await?;
        Ok(())
    }

    /// Describe a single stack
    pub async fn describe_stack(&self, region: &str, name: &str) -> Result<StackInfo> {
        let output = self
            .client(region)
            .await
            .describe_stacks()
            .stack_name(name)
            .send()
            .await?;

        let stack = output
            .stacks()
            .first()
            .ok_or_else(|| AwsError::StackNotFound(name.to_string()))?;

        let status: Option<&StackStatus> = stack.stack_status().into();
        let outputs = stack
            .outputs()
            .iter()
            .filter_map(|o| {
                let key: Option<&str> = o.output_key().into();
                let value: Option<&str> = o.output_value().into();
                Some((key?.to_string(), value.unwrap_or_default().to_string()))
            })
            .collect();

        Ok(StackInfo {
            name: name.to_string(),
            status: status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            outputs,
        })
    }

    /// List the resources of a stack with their current status
    pub async fn describe_stack_resources(
        &self,
        region: &str,
        name: &str,
    ) -> Result<Vec<StackResourceInfo>> {
        let output = self
            .client(region)
            .await
            .describe_stack_resources()
            .stack_name(name)
            .send()
            .await?;

        Ok(output
            .stack_resources()
            .iter()
            .map(|r| {
                let id: Option<&str> = r.logical_resource_id().into();
                let status: Option<&ResourceStatus> = r.resource_status().into();
                StackResourceInfo {
                    logical_id: id.unwrap_or_default().to_string(),
                    status: status.map(|s| s.as_str().to_string()).unwrap_or_default(),
                }
            })
            .collect())
    }
}

/// Stack summary from DescribeStacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackInfo {
    pub name: String,

    /// Raw status (e.g., "UPDATE_COMPLETE")
    pub status: String,

    /// Output key to value
    pub outputs: HashMap<String, String>,
}

/// Resource entry from DescribeStackResources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResourceInfo {
    pub logical_id: String,
    pub status: String,
}
