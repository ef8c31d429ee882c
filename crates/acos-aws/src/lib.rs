//! AWS SDK implementations of the acos API traits
//!
//! Each client wraps one (or, for the caller identity, two) SDK clients
//! built from a shared [`aws_config::SdkConfig`] and translates between SDK
//! shapes and the plain types in [`acos_core::api`].

pub mod config;
pub mod cost_explorer;
pub mod identity;
pub mod organizations;

pub use config::{AwsClients, load_sdk_config};
pub use cost_explorer::CostExplorerClient;
pub use identity::CallerIdentityClient;
pub use organizations::OrganizationsClient;
