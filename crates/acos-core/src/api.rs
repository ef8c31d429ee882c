//! AWS API seams
//!
//! The aggregator and the account resolver talk to AWS only through these
//! traits. `acos-aws` implements them on top of the AWS SDK; tests plug in
//! in-memory fakes. Request and response shapes are reduced to what acos
//! reads, with dates already parsed.

use crate::error::Result;
use crate::types::{Account, AccountId, RecordType};
use async_trait::async_trait;
use chrono::NaiveDate;

/// A daily, per-linked-account `GetCostAndUsage` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostQuery {
    /// Inclusive start of the window
    pub start: NaiveDate,
    /// Exclusive end of the window
    pub end: NaiveDate,
    /// Linked accounts to filter on
    pub account_ids: Vec<AccountId>,
    /// Record types filtered out of the result
    pub excluded_record_types: Vec<RecordType>,
}

/// Cost of one linked account within a bucket
#[derive(Debug, Clone, PartialEq)]
pub struct AccountCost {
    pub account_id: AccountId,
    pub amount: f64,
}

/// One day of results (`ResultsByTime` item)
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCost {
    /// Inclusive start of the bucket
    pub start: NaiveDate,
    /// Exclusive end of the bucket
    pub end: NaiveDate,
    pub groups: Vec<AccountCost>,
}

/// One page of `GetCostAndUsage` results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostPage {
    /// Buckets sorted by start date, as documented for the API
    pub results_by_time: Vec<DailyCost>,
    pub next_page_token: Option<String>,
}

/// Cost Explorer access
#[async_trait]
pub trait CostExplorerApi: Send + Sync {
    /// Fetch one page of daily costs grouped by linked account
    async fn get_cost_and_usage(
        &self,
        query: &CostQuery,
        next_page_token: Option<&str>,
    ) -> Result<CostPage>;
}

/// One page of Organizations account listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPage {
    pub accounts: Vec<Account>,
    pub next_token: Option<String>,
}

/// AWS Organizations access
///
/// Implementations report a disabled organization as
/// [`AcosError::OrganizationsNotInUse`](crate::AcosError::OrganizationsNotInUse),
/// missing permissions as
/// [`AcosError::OrganizationsAccessDenied`](crate::AcosError::OrganizationsAccessDenied)
/// and an unknown parent as [`AcosError::OuNotFound`](crate::AcosError::OuNotFound).
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    /// List every account of the organization
    async fn list_accounts(&self, next_token: Option<&str>) -> Result<AccountPage>;

    /// List the direct-child accounts of an OU or root
    async fn list_accounts_for_parent(
        &self,
        parent_id: &str,
        next_token: Option<&str>,
    ) -> Result<AccountPage>;
}

/// STS and IAM access for the caller's own account
#[async_trait]
pub trait CallerIdentityApi: Send + Sync {
    /// Account ID of the current credentials
    async fn caller_account_id(&self) -> Result<AccountId>;

    /// IAM account aliases of the current account
    async fn account_aliases(&self) -> Result<Vec<String>>;
}
