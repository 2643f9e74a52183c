//! StackFlow Cloud
//!
//! Drives deployment and removal of an infrastructure stack and reports
//! live progress to a terminal.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  StackFlow CLI                   │
//! │              (stack deploy/remove)               │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               stackflow-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  Deployer (start → poll → outputs)        │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │   poll       │  │   status     │            │
//! │  │  (backoff)   │  │  (report)    │            │
//! │  └──────────────┘  └──────────────┘            │
//! │  trait StackProvider   trait Terminal/Sleeper    │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │      aws      │
//! │ cloudformation│
//! └───────────────┘
//! ```

pub mod deploy;
pub mod error;
pub mod poll;
pub mod provider;
pub mod result;
pub mod status;
pub mod terminal;

#[cfg(test)]
mod testing;

// Re-exports
pub use deploy::{Deployer, StackParams};
pub use error::{CloudError, Result};
pub use poll::{Backoff, PollConfig, PollOutcome, PollSettings, poll};
pub use provider::{Resource, StackProvider, StackStatus, StatusResponse};
pub use result::{DeploymentResult, UNEXPECTED_ERROR_MESSAGE};
pub use status::{ResourceState, format_report, format_resource_line, print_report};
pub use terminal::{Sleeper, Terminal, TokioSleeper};
