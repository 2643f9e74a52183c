//! AWS provider for StackFlow
//!
//! This crate implements the StackProvider trait on top of AWS
//! CloudFormation.
//!
//! # Requirements
//!
//! - AWS credentials resolvable by the default provider chain
//!   (environment, shared config/profile, SSO, instance metadata)
//!
//! # Example
//!
//! ```ignore
//! use stackflow_cloud::{Deployer, StackParams, TokioSleeper};
//! use stackflow_cloud_aws::AwsStackProvider;
//!
//! let provider = AwsStackProvider::new();
//! let result = Deployer::new(&provider, &terminal, &TokioSleeper)
//!     .deploy(&params)
//!     .await;
//! ```

pub mod cloudformation;
pub mod error;
pub mod provider;

pub use cloudformation::{CloudFormation, StackInfo, StackResourceInfo};
pub use error::{AwsError, Result};
pub use provider::{AwsStackProvider, classify_stack_status};
