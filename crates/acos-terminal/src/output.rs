//! Output formatting module for acos
//!
//! This module provides formatters for displaying cost reports in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use acos_core::types::{Account, ComparedTo, CostSummary, Costs};
//! use acos_terminal::output::get_formatter;
//! use chrono::NaiveDate;
//!
//! let account = Account::new("123456789012", "production");
//! let mut costs = Costs::new();
//! costs.insert(account.id.clone(), CostSummary::zero(&account));
//! let as_of = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//!
//! // Table for humans
//! let table = get_formatter(false)
//!     .format_costs(&costs, as_of, ComparedTo::Yesterday)
//!     .unwrap();
//! assert!(table.contains("production"));
//!
//! // JSON for scripts
//! let json = get_formatter(true)
//!     .format_costs(&costs, as_of, ComparedTo::Yesterday)
//!     .unwrap();
//! assert!(json.contains("\"as_of\": \"2024-03-15\""));
//! ```

use acos_core::dates::DATE_FORMAT;
use acos_core::error::Result;
use acos_core::types::{ComparedTo, CostSummary, CostTotals, Costs};
use chrono::NaiveDate;
use prettytable::{Cell, Row, Table, format, row};
use serde::Serialize;

/// Trait for output formatters
///
/// `costs` iterates in account-ID order, which is the order rows are
/// rendered in.
pub trait OutputFormatter {
    /// Format per-account cost summaries with totals
    fn format_costs(
        &self,
        costs: &Costs,
        as_of: NaiveDate,
        compared_to: ComparedTo,
    ) -> Result<String>;
}

/// Table formatter for human-readable output
///
/// Amounts are shown with two decimals and thousands separators; the delta
/// column carries an explicit `+` for increases.
pub struct TableFormatter;

impl TableFormatter {
    /// Format an amount with two decimals and thousands separators
    fn format_amount(amount: f64) -> String {
        let formatted = format!("{:.2}", amount.abs());
        let (integer, fraction) = formatted
            .split_once('.')
            .unwrap_or((formatted.as_str(), "00"));

        let mut grouped = String::new();
        for (count, ch) in integer.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let integer: String = grouped.chars().rev().collect();

        let sign = if amount < 0.0 && formatted != "0.00" {
            "-"
        } else {
            ""
        };
        format!("{sign}{integer}.{fraction}")
    }

    /// Format a delta, prefixing increases with `+`
    fn format_increase(amount: f64) -> String {
        let formatted = Self::format_amount(amount);
        if amount > 0.0 && formatted != "0.00" {
            format!("+{formatted}")
        } else {
            formatted
        }
    }

    fn format_row(cost: &CostSummary, compared_to: ComparedTo) -> Row {
        row![
            cost.account_id,
            cost.account_name,
            r -> Self::format_amount(cost.amount_this_month),
            r -> Self::format_increase(cost.increase(compared_to)),
            r -> Self::format_amount(cost.amount_last_month)
        ]
    }

    /// Create a totals row for the table
    fn format_totals_row(totals: &CostTotals, compared_to: ComparedTo) -> Row {
        row![
            "",
            b -> "TOTAL",
            br -> Self::format_amount(totals.amount_this_month),
            br -> Self::format_increase(totals.increase(compared_to)),
            br -> Self::format_amount(totals.amount_last_month)
        ]
    }
}

impl OutputFormatter for TableFormatter {
    fn format_costs(
        &self,
        costs: &Costs,
        as_of: NaiveDate,
        compared_to: ComparedTo,
    ) -> Result<String> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Account ID",
            b -> "Account Name",
            b -> "This Month ($)",
            b -> compared_to.column_title(),
            b -> "Last Month ($)"
        ]);

        for cost in costs.values() {
            table.add_row(Self::format_row(cost, compared_to));
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 5]));

        // Add totals row
        table.add_row(Self::format_totals_row(
            &CostTotals::from_costs(costs),
            compared_to,
        ));

        let mut output = table.to_string();
        output.push_str(&format!("As of {}.\n", as_of.format(DATE_FORMAT)));
        Ok(output)
    }
}

/// JSON formatter for machine-readable output
///
/// Both deltas are always included, so the comparison mode is ignored.
pub struct JsonFormatter;

#[derive(Serialize)]
struct CostReport<'a> {
    as_of: String,
    costs: Vec<&'a CostSummary>,
    totals: CostTotals,
}

impl OutputFormatter for JsonFormatter {
    fn format_costs(
        &self,
        costs: &Costs,
        as_of: NaiveDate,
        _compared_to: ComparedTo,
    ) -> Result<String> {
        let report = CostReport {
            as_of: as_of.format(DATE_FORMAT).to_string(),
            costs: costs.values().collect(),
            totals: CostTotals::from_costs(costs),
        };

        Ok(serde_json::to_string_pretty(&report)?)
    }
}

/// Get appropriate formatter based on JSON flag
///
/// # Examples
///
/// ```
/// use acos_terminal::output::{get_formatter, OutputFormatter};
///
/// // Get table formatter for human-readable output
/// let formatter = get_formatter(false);
///
/// // Get JSON formatter for machine-readable output
/// let json_formatter = get_formatter(true);
/// ```
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
