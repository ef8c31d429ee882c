//! Terminal output formatting for acos
//!
//! This crate provides the table and JSON formatters for cost reports.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
