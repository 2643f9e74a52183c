mod commands;
mod terminal;
mod utils;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use utils::TargetOverrides;

#[derive(Parser)]
#[command(name = "stack")]
#[command(about = "Deploy CloudFormation stacks and watch them settle", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the stack and wait for it to finish
    Deploy {
        #[command(flatten)]
        target: TargetArgs,
        /// Template file (defaults to `template` in stackflow.yaml)
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Stack output to print after deployment (repeatable)
        #[arg(short = 'o', long = "output")]
        outputs: Vec<String>,
        /// Print the result as JSON instead of a live report
        #[arg(long)]
        json: bool,
    },
    /// Delete the stack and wait for it to disappear
    Remove {
        #[command(flatten)]
        target: TargetArgs,
        /// Print the result as JSON instead of a live report
        #[arg(long)]
        json: bool,
    },
    /// Show version information
    Version,
}

#[derive(Args)]
struct TargetArgs {
    /// Stage name (dev, stg, prod), appended to the stack name
    stage: Option<String>,
    /// Stage name (-s/--stage flag, STACKFLOW_STAGE environment variable)
    #[arg(
        short = 's',
        long = "stage",
        env = "STACKFLOW_STAGE",
        conflicts_with = "stage",
        hide = true
    )]
    stage_flag: Option<String>,
    /// Stack base name
    #[arg(short, long)]
    name: Option<String>,
    /// AWS region
    #[arg(short, long, env = "AWS_REGION")]
    region: Option<String>,
}

impl From<TargetArgs> for TargetOverrides {
    fn from(args: TargetArgs) -> Self {
        Self {
            name: args.name,
            region: args.region,
            stage: args.stage.or(args.stage_flag),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the status report.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let (result, json) = match cli.command {
        Commands::Version => {
            println!("stackflow {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Deploy {
            target,
            template,
            outputs,
            json,
        } => {
            let stack_file = stackflow_config::load()?;
            let params =
                utils::resolve_params(target.into(), template, outputs, stack_file.as_ref(), true)?;
            let settings = utils::poll_settings(stack_file.as_ref());
            (commands::deploy::handle(&params, settings, json).await, json)
        }
        Commands::Remove { target, json } => {
            let stack_file = stackflow_config::load()?;
            let params =
                utils::resolve_params(target.into(), None, Vec::new(), stack_file.as_ref(), false)?;
            let settings = utils::poll_settings(stack_file.as_ref());
            (commands::remove::handle(&params, settings, json).await, json)
        }
    };

    if !commands::report(&result, json)? {
        std::process::exit(1);
    }
    Ok(())
}
