use crate::terminal::ConsoleTerminal;
use colored::Colorize;
use stackflow_cloud::{Deployer, DeploymentResult, PollSettings, StackParams, TokioSleeper};
use stackflow_cloud_aws::AwsStackProvider;

pub async fn handle(params: &StackParams, settings: PollSettings, json: bool) -> DeploymentResult {
    if !json {
        println!("{}", "Starting deployment...".blue().bold());
        println!(
            "Stack: {}  Region: {}",
            params.stack_name().cyan(),
            params.region.cyan()
        );
        if !params.outputs.is_empty() {
            println!("Outputs: {}", params.outputs.join(", "));
        }
    }

    let provider = AwsStackProvider::new();
    let terminal = if json {
        ConsoleTerminal::quiet()
    } else {
        ConsoleTerminal::new()
    };

    Deployer::new(&provider, &terminal, &TokioSleeper)
        .with_settings(settings)
        .deploy(params)
        .await
}
