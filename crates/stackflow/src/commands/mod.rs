pub mod deploy;
pub mod remove;

use colored::Colorize;
use stackflow_cloud::DeploymentResult;

/// Print the final result; returns whether it succeeded
pub fn report(result: &DeploymentResult, json: bool) -> anyhow::Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(result.is_ok());
    }

    match result {
        DeploymentResult::Ok { message, outputs } => {
            println!("{}", message.green().bold());
            if !outputs.is_empty() {
                println!();
                println!("{}", "Outputs:".bold());
                for (key, value) in outputs {
                    println!("  • {} = {}", key.cyan(), value);
                }
            }
            Ok(true)
        }
        DeploymentResult::Error { message } => {
            eprintln!("{} {}", "✖".red(), message.red().bold());
            Ok(false)
        }
    }
}
