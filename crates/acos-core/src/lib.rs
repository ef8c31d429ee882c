//! Core types, traits, and utilities for acos
//!
//! This crate provides the foundational types, error handling, report
//! date arithmetic and the AWS API seams used by all other acos crates.

pub mod api;
pub mod dates;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use dates::ReportDates;
pub use error::{AcosError, Result};
pub use types::{Account, AccountId, Accounts, ComparedTo, CostSummary, CostTotals, Costs};
