//! Deployment orchestration
//!
//! Start the stack change, poll until the stack settles, optionally fetch
//! outputs, and fold every failure into a [`DeploymentResult`].

use crate::error::{CloudError, Result};
use crate::poll::{self, PollOutcome, PollSettings};
use crate::provider::StackProvider;
use crate::result::DeploymentResult;
use crate::status;
use crate::terminal::{Sleeper, Terminal};
use std::collections::BTreeMap;

/// Input of a deploy or remove operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackParams {
    pub name: String,
    pub region: String,
    pub stage: String,

    /// Template body; required for deploy, ignored by remove
    pub template: Option<String>,

    /// Output names to read after a successful deploy
    pub outputs: Vec<String>,
}

impl StackParams {
    /// Stack identifier on the provider side: name immediately followed by stage
    pub fn stack_name(&self) -> String {
        format!("{}{}", self.name, self.stage)
    }
}

/// User-facing texts of one operation
#[derive(Debug, Clone, Copy)]
struct Messages {
    in_process: &'static str,
    fail: &'static str,
    rollback: &'static str,
    in_progress: &'static str,
    complete: &'static str,
    success: &'static str,
}

const DEPLOY: Messages = Messages {
    in_process: "Deploying CloudFormation Template",
    fail: "CloudFormation deployment has failed",
    rollback: "Deployment has been rolled back",
    in_progress: "Deployment is still in progress",
    complete: "Deployment Complete",
    success: "Template deployed successfully",
};

const REMOVE: Messages = Messages {
    in_process: "Removing CloudFormation Template",
    fail: "CloudFormation removal has failed",
    rollback: "Removal has been rolled back",
    in_progress: "Removal is still in progress",
    complete: "Removal Complete",
    success: "Template removed successfully",
};

/// Drives deploy/remove against a provider and reports to a terminal
pub struct Deployer<'a> {
    provider: &'a dyn StackProvider,
    terminal: &'a dyn Terminal,
    sleeper: &'a dyn Sleeper,
    settings: PollSettings,
}

impl<'a> Deployer<'a> {
    pub fn new(
        provider: &'a dyn StackProvider,
        terminal: &'a dyn Terminal,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            provider,
            terminal,
            sleeper,
            settings: PollSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Create or update the stack and wait for it to settle
    pub async fn deploy(&self, params: &StackParams) -> DeploymentResult {
        match self.try_deploy(params).await {
            Ok(outputs) => DeploymentResult::ok(DEPLOY.success, outputs),
            Err(e) => {
                tracing::info!("Deployment of {} ended with: {}", params.stack_name(), e);
                self.terminal.stop_spinner();
                DeploymentResult::from_error(&e)
            }
        }
    }

    /// Delete the stack and wait for it to disappear
    ///
    /// A stack that does not exist counts as removed.
    pub async fn remove(&self, params: &StackParams) -> DeploymentResult {
        match self.try_remove(params).await {
            Ok(()) => DeploymentResult::ok(REMOVE.success, BTreeMap::new()),
            Err(e) if e.is_stack_not_found() => {
                tracing::warn!("{} does not exist, nothing to remove", params.stack_name());
                self.terminal.stop_spinner();
                self.terminal.clear();
                DeploymentResult::ok(REMOVE.success, BTreeMap::new())
            }
            Err(e) => {
                tracing::info!("Removal of {} ended with: {}", params.stack_name(), e);
                self.terminal.stop_spinner();
                DeploymentResult::from_error(&e)
            }
        }
    }

    async fn try_deploy(&self, params: &StackParams) -> Result<BTreeMap<String, String>> {
        let template = params.template.as_deref().ok_or_else(|| {
            CloudError::InvalidConfig("a template is required to deploy a stack".to_string())
        })?;
        let stack = params.stack_name();

        tracing::info!(
            "Deploying {} to {} via {}",
            stack,
            params.region,
            self.provider.name()
        );
        self.provider
            .start_stack_change(&stack, &params.region, template)
            .await?;

        self.wait_for_stack(&stack, &params.region, &DEPLOY).await?;

        if params.outputs.is_empty() {
            return Ok(BTreeMap::new());
        }

        let outputs = self
            .provider
            .fetch_outputs(&stack, &params.region, &params.outputs)
            .await?;

        self.terminal.clear();
        self.terminal.write_success(DEPLOY.complete);

        Ok(outputs)
    }

    async fn try_remove(&self, params: &StackParams) -> Result<()> {
        let stack = params.stack_name();

        tracing::info!(
            "Removing {} from {} via {}",
            stack,
            params.region,
            self.provider.name()
        );
        self.provider.remove_stack(&stack, &params.region).await?;

        self.wait_for_stack(&stack, &params.region, &REMOVE).await?;

        self.terminal.clear();
        self.terminal.write_success(REMOVE.complete);

        Ok(())
    }

    /// Poll until the stack is terminal and turn non-success outcomes into errors
    async fn wait_for_stack(&self, stack: &str, region: &str, messages: &Messages) -> Result<()> {
        let terminal = self.terminal;
        terminal.clear();
        terminal.stop_spinner();
        terminal.start_spinner(messages.in_process);

        let config = self.settings.for_stack(stack, region);
        let outcome = poll::poll(self.provider, self.sleeper, &config, |resources| {
            status::print_report(terminal, resources);
            terminal.stop_spinner();
            terminal.start_spinner(messages.in_process);
        })
        .await?;

        terminal.stop_spinner();
        tracing::info!("{} finished polling: {:?}", stack, outcome);

        match outcome {
            PollOutcome::Success => Ok(()),
            PollOutcome::Fail => Err(CloudError::DeploymentFailed(messages.fail.to_string())),
            PollOutcome::Rollback => Err(CloudError::RolledBack(messages.rollback.to_string())),
            PollOutcome::Exhausted => {
                Err(CloudError::StillInProgress(messages.in_progress.to_string()))
            }
        }
    }
}
