use stackflow_cloud::{PollSettings, StackParams};
use stackflow_config::{LoadedStackFile, PollingConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Stack selection given on the command line
#[derive(Debug, Clone, Default)]
pub struct TargetOverrides {
    pub name: Option<String>,
    pub region: Option<String>,
    pub stage: Option<String>,
}

/// Merge command-line values over the stack file
///
/// Flags win; the stack file fills whatever the flags leave out.
pub fn resolve_params(
    overrides: TargetOverrides,
    template: Option<PathBuf>,
    outputs: Vec<String>,
    stack_file: Option<&LoadedStackFile>,
    require_template: bool,
) -> anyhow::Result<StackParams> {
    let file = stack_file.map(|loaded| &loaded.file);

    let name = overrides
        .name
        .or_else(|| file.and_then(|f| f.name.clone()))
        .ok_or_else(|| {
            anyhow::anyhow!("Stack name is required: pass --name or set `name` in stackflow.yaml")
        })?;

    let region = overrides
        .region
        .or_else(|| file.and_then(|f| f.region.clone()))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Region is required: pass --region, set AWS_REGION or `region` in stackflow.yaml"
            )
        })?;

    let stage = overrides
        .stage
        .or_else(|| file.and_then(|f| f.stage.clone()))
        .ok_or_else(|| {
            anyhow::anyhow!("Stage is required: stack <command> <stage> or STACKFLOW_STAGE=<stage>")
        })?;

    let outputs = if outputs.is_empty() {
        file.map(|f| f.outputs.clone()).unwrap_or_default()
    } else {
        outputs
    };

    let template = if require_template {
        let path = template
            .or_else(|| stack_file.and_then(|loaded| loaded.template_path()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Template is required: pass --template or set `template` in stackflow.yaml"
                )
            })?;
        Some(stackflow_config::read_template(&path)?)
    } else {
        None
    };

    Ok(StackParams {
        name,
        region,
        stage,
        template,
        outputs,
    })
}

/// Polling settings with stack file overrides applied
pub fn poll_settings(stack_file: Option<&LoadedStackFile>) -> PollSettings {
    let mut settings = PollSettings::default();
    let Some(PollingConfig {
        min_interval_ms,
        max_interval_ms,
        backoff_rate,
        max_attempts,
    }) = stack_file.map(|loaded| loaded.file.polling.clone())
    else {
        return settings;
    };

    if let Some(ms) = min_interval_ms {
        settings.min_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = max_interval_ms {
        settings.max_interval = Duration::from_millis(ms);
    }
    if let Some(rate) = backoff_rate {
        settings.backoff_rate = rate;
    }
    if let Some(attempts) = max_attempts {
        settings.max_attempts = attempts;
    }
    settings
}
