//! SDK configuration loading

use crate::{CallerIdentityClient, CostExplorerClient, OrganizationsClient};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;
use tracing::debug;

/// Load the shared SDK configuration from the standard AWS provider chain
///
/// `profile` and `region` override what the environment and shared config
/// files would otherwise select.
pub async fn load_sdk_config(profile: Option<&str>, region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = profile {
        debug!("Using AWS profile: {}", profile);
        loader = loader.profile_name(profile);
    }
    if let Some(region) = region {
        debug!("Using AWS region: {}", region);
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}

/// Every client acos needs, built from one configuration
#[derive(Clone)]
pub struct AwsClients {
    pub cost_explorer: Arc<CostExplorerClient>,
    pub organizations: Arc<OrganizationsClient>,
    pub caller_identity: Arc<CallerIdentityClient>,
}

impl AwsClients {
    /// Build all clients from a loaded configuration
    pub fn from_config(config: &SdkConfig) -> Self {
        Self {
            cost_explorer: Arc::new(CostExplorerClient::new(config)),
            organizations: Arc::new(OrganizationsClient::new(config)),
            caller_identity: Arc::new(CallerIdentityClient::new(config)),
        }
    }
}
