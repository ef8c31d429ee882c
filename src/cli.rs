//! CLI interface for acos
//!
//! This module defines the command-line interface using clap. acos has a
//! single command; flags pick the accounts, the as-of date, the comparison
//! column and the output format.
//!
//! # Example
//!
//! ```bash
//! # Every account of the organization, compared to yesterday
//! acos
//!
//! # Accounts directly under an OU, as of a past date, compared to last week
//! acos --ou ou-ab12-34cd56ef --asOf 2024-03-15 --comparedTo LAST_WEEK
//!
//! # Machine-readable output
//! acos --json
//! ```

use crate::accounts::AccountScope;
use acos_core::dates::DATE_FORMAT;
use acos_core::error::{AcosError, Result};
use acos_core::types::{ComparedTo, RecordTypeExclusions};
use chrono::NaiveDate;
use clap::Parser;

/// Show AWS account costs for this month, last month and the latest day or week
#[derive(Parser, Debug, Clone)]
#[command(name = "acos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// OU or root ID whose direct-child accounts are reported (ou-xxxx-xxxxxxxx or r-xxxx)
    #[arg(long, value_name = "ID")]
    pub ou: Option<String>,

    /// Report date in YYYY-MM-DD (default: today in UTC)
    #[arg(long = "asOf", visible_alias = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<String>,

    /// Delta shown in the table: YESTERDAY or LAST_WEEK (ignored with --json)
    #[arg(
        long = "comparedTo",
        visible_alias = "compared-to",
        default_value = "YESTERDAY",
        value_name = "PERIOD"
    )]
    pub compared_to: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include credits (excluded by default)
    #[arg(long)]
    pub include_credit: bool,

    /// Include upfront reservation fees (excluded by default)
    #[arg(long)]
    pub include_upfront: bool,

    /// Exclude refunds
    #[arg(long)]
    pub exclude_refund: bool,

    /// Exclude support charges
    #[arg(long)]
    pub exclude_support: bool,

    /// AWS shared config profile
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region for the API clients
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Show informational output (default only shows warnings and errors)
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Fixed account IDs, bypassing account discovery
    #[arg(
        long,
        env = "COMMA_SEPARATED_ACCOUNT_IDS",
        value_delimiter = ',',
        hide = true
    )]
    pub account_ids: Vec<String>,
}

impl Cli {
    /// The as-of date, falling back to `today`
    pub fn as_of_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        match &self.as_of {
            Some(value) => parse_as_of(value),
            None => Ok(today),
        }
    }

    /// The comparison column
    pub fn compared_to(&self) -> Result<ComparedTo> {
        self.compared_to.parse()
    }

    /// Record types to leave out of the cost query
    pub fn record_type_exclusions(&self) -> RecordTypeExclusions {
        RecordTypeExclusions {
            credit: !self.include_credit,
            upfront: !self.include_upfront,
            refund: self.exclude_refund,
            support: self.exclude_support,
        }
    }

    /// Which accounts to report on
    pub fn account_scope(&self) -> AccountScope {
        let ids: Vec<String> = self
            .account_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        if !ids.is_empty() {
            AccountScope::Debug(ids)
        } else if let Some(ou) = &self.ou {
            AccountScope::OrganizationalUnit(ou.clone())
        } else {
            AccountScope::Organization
        }
    }

    /// Default tracing filter for the verbosity flags
    ///
    /// `None` means `RUST_LOG` (or the quiet default) decides.
    pub fn log_filter(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("acos=info")
        } else {
            None
        }
    }
}

/// Parse a `--asOf` value
///
/// Only the full `YYYY-MM-DD` form is accepted.
///
/// # Example
///
/// ```
/// use acos::cli::parse_as_of;
///
/// assert!(parse_as_of("2024-03-15").is_ok());
/// assert!(parse_as_of("2024-03").is_err());
/// ```
pub fn parse_as_of(date_str: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2 {
        return Err(AcosError::InvalidDate(format!(
            "'{date_str}', expected YYYY-MM-DD"
        )));
    }

    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|e| AcosError::InvalidDate(format!("'{date_str}': {e}")))
}
