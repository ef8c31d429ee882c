//! Core domain types for acos
//!
//! Accounts, per-account cost summaries and the small enums that travel
//! between the CLI, the aggregator and the formatters.

use crate::error::AcosError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Strongly-typed AWS account ID wrapper
///
/// # Examples
/// ```
/// use acos_core::types::AccountId;
///
/// let id = AccountId::new("123456789012");
/// assert_eq!(id.as_str(), "123456789012");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new AccountId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An AWS account as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID
    pub id: AccountId,
    /// Display name (Organizations account name or IAM alias)
    pub name: String,
}

impl Account {
    /// Create a new Account
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(id),
            name: name.into(),
        }
    }
}

/// Accounts keyed by account ID
pub type Accounts = BTreeMap<AccountId, Account>;

/// Cost summary for a single account
///
/// All amounts share the currency reported by Cost Explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Account ID
    pub account_id: AccountId,
    /// Account display name
    pub account_name: String,
    /// Cost accrued since the first day of the current month
    pub amount_this_month: f64,
    /// Cost of the whole previous month
    pub amount_last_month: f64,
    /// Cost of the day before the as-of date
    pub latest_daily_cost_increase: f64,
    /// Cost of the seven days before the as-of date
    pub latest_weekly_cost_increase: f64,
}

impl CostSummary {
    /// Create an all-zero summary for an account
    pub fn zero(account: &Account) -> Self {
        Self {
            account_id: account.id.clone(),
            account_name: account.name.clone(),
            amount_this_month: 0.0,
            amount_last_month: 0.0,
            latest_daily_cost_increase: 0.0,
            latest_weekly_cost_increase: 0.0,
        }
    }

    /// The delta shown next to this month's amount
    pub fn increase(&self, compared_to: ComparedTo) -> f64 {
        match compared_to {
            ComparedTo::Yesterday => self.latest_daily_cost_increase,
            ComparedTo::LastWeek => self.latest_weekly_cost_increase,
        }
    }
}

/// Cost summaries keyed (and therefore sorted) by account ID
pub type Costs = BTreeMap<AccountId, CostSummary>;

/// Column totals across all summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostTotals {
    pub amount_this_month: f64,
    pub amount_last_month: f64,
    pub latest_daily_cost_increase: f64,
    pub latest_weekly_cost_increase: f64,
}

impl CostTotals {
    /// Sum every column of the given summaries
    pub fn from_costs(costs: &Costs) -> Self {
        costs.values().fold(Self::default(), |mut totals, cost| {
            totals.amount_this_month += cost.amount_this_month;
            totals.amount_last_month += cost.amount_last_month;
            totals.latest_daily_cost_increase += cost.latest_daily_cost_increase;
            totals.latest_weekly_cost_increase += cost.latest_weekly_cost_increase;
            totals
        })
    }

    /// The delta total matching [`CostSummary::increase`]
    pub fn increase(&self, compared_to: ComparedTo) -> f64 {
        match compared_to {
            ComparedTo::Yesterday => self.latest_daily_cost_increase,
            ComparedTo::LastWeek => self.latest_weekly_cost_increase,
        }
    }
}

/// Which delta the table compares this month's amount to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparedTo {
    #[default]
    Yesterday,
    LastWeek,
}

impl ComparedTo {
    /// Header of the delta column in the table output
    pub fn column_title(&self) -> &'static str {
        match self {
            ComparedTo::Yesterday => "vs Yesterday ($)",
            ComparedTo::LastWeek => "vs Last Week ($)",
        }
    }
}

impl FromStr for ComparedTo {
    type Err = AcosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YESTERDAY" => Ok(ComparedTo::Yesterday),
            "LAST_WEEK" => Ok(ComparedTo::LastWeek),
            other => Err(AcosError::InvalidComparedTo(other.to_string())),
        }
    }
}

impl fmt::Display for ComparedTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparedTo::Yesterday => write!(f, "YESTERDAY"),
            ComparedTo::LastWeek => write!(f, "LAST_WEEK"),
        }
    }
}

/// Cost Explorer `RECORD_TYPE` dimension values acos can exclude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Credit,
    Upfront,
    Refund,
    Support,
}

impl RecordType {
    /// Dimension value as Cost Explorer expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Credit => "Credit",
            RecordType::Upfront => "Upfront",
            RecordType::Refund => "Refund",
            RecordType::Support => "Support",
        }
    }
}

/// Record types filtered out of the cost query
///
/// Credits and upfront fees are excluded by default; refunds and support
/// charges are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTypeExclusions {
    pub credit: bool,
    pub upfront: bool,
    pub refund: bool,
    pub support: bool,
}

impl Default for RecordTypeExclusions {
    fn default() -> Self {
        Self {
            credit: true,
            upfront: true,
            refund: false,
            support: false,
        }
    }
}

impl RecordTypeExclusions {
    /// Excluded record types in a stable order
    pub fn excluded(&self) -> Vec<RecordType> {
        [
            (self.credit, RecordType::Credit),
            (self.upfront, RecordType::Upfront),
            (self.refund, RecordType::Refund),
            (self.support, RecordType::Support),
        ]
        .into_iter()
        .filter_map(|(excluded, record_type)| excluded.then_some(record_type))
        .collect()
    }
}
