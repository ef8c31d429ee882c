//! Error types for acos
//!
//! This module defines the error type used throughout the acos crates.
//! All errors are derived from `thiserror` for convenient error handling.
//!
//! # Example
//!
//! ```
//! use acos_core::error::{AcosError, Result};
//!
//! fn total(amounts: &[f64]) -> Result<f64> {
//!     if amounts.is_empty() {
//!         return Err(AcosError::NoAccounts);
//!     }
//!     Ok(amounts.iter().sum())
//! }
//!
//! assert!(matches!(total(&[]), Err(AcosError::NoAccounts)));
//! ```

use thiserror::Error;

/// Main error type for acos operations
///
/// Covers argument validation, account discovery, the AWS API calls and
/// output encoding.
#[derive(Error, Debug)]
pub enum AcosError {
    /// JSON encoding error
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cost retrieval was requested without any account
    #[error("No account to retrieve costs for: at least one account is required")]
    NoAccounts,

    /// Account discovery returned nothing
    #[error("No accounts found")]
    NoAccountsFound,

    /// The user confirmed the selection prompt without picking anything
    #[error("No accounts selected")]
    NoAccountsSelected,

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Unsupported value for the comparison column
    #[error("Invalid comparison '{0}', expected 'YESTERDAY' or 'LAST_WEEK'")]
    InvalidComparedTo(String),

    /// The caller's account is not part of an AWS Organizations organization
    #[error("This AWS account is not part of AWS Organizations organization")]
    OrganizationsNotInUse,

    /// The caller lacks IAM permissions for an Organizations operation
    #[error("You don't have IAM permissions to perform \"organizations:{operation}\"")]
    OrganizationsAccessDenied {
        /// The Organizations API operation that was denied
        operation: &'static str,
    },

    /// The OU (or root) passed to `--ou` does not exist
    #[error("The OU \"{0}\" doesn't exist")]
    OuNotFound(String),

    /// Any other AWS API failure
    #[error("AWS {operation} failed: {message}")]
    Aws {
        /// The API operation that failed
        operation: &'static str,
        /// Full error context reported by the SDK
        message: String,
    },

    /// Interactive prompt failure
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl AcosError {
    /// Whether account discovery should retry with the caller's own identity.
    ///
    /// Organizations being disabled or forbidden still leaves the caller's
    /// account reachable through STS and IAM.
    pub fn allows_caller_identity_fallback(&self) -> bool {
        matches!(
            self,
            AcosError::OrganizationsNotInUse | AcosError::OrganizationsAccessDenied { .. }
        )
    }
}

/// Convenience type alias for Results in acos
///
/// # Example
///
/// ```
/// use acos_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AcosError>;
