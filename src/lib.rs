//! acos - Show AWS account costs for this month, last month and the latest day or week
//!
//! This library provides functionality to:
//! - Resolve the accounts of an AWS Organizations organization or OU
//! - Let the user pick accounts interactively
//! - Aggregate daily Cost Explorer results into per-account summaries
//! - Render the summaries as a table or JSON
//!
//! # Examples
//!
//! ```no_run
//! use acos::{
//!     accounts::{AccountResolver, AccountScope},
//!     aggregation::{CostAggregator, GetCostsOptions},
//! };
//! use acos_aws::{AwsClients, load_sdk_config};
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> acos::Result<()> {
//!     let config = load_sdk_config(None, None).await;
//!     let clients = AwsClients::from_config(&config);
//!
//!     let resolver = AccountResolver::new(clients.organizations, clients.caller_identity);
//!     let accounts = resolver.resolve(&AccountScope::Organization).await?;
//!
//!     let aggregator = CostAggregator::new(clients.cost_explorer);
//!     let options = GetCostsOptions::new(Utc::now().date_naive())?;
//!     let costs = aggregator.get_costs(&accounts, &options).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod aggregation;
pub mod cli;
pub mod report;
pub mod selector;

// Re-export commonly used types
pub use acos_core::{AcosError, Result};
pub use acos_core::{Account, AccountId, Accounts, ComparedTo, CostSummary, Costs};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
