//! Caller identity via STS and IAM
//!
//! Used when Organizations cannot list accounts: the caller's own account ID
//! comes from `GetCallerIdentity` and its display name from the IAM account
//! alias.

use acos_core::api::CallerIdentityApi;
use acos_core::error::{AcosError, Result};
use acos_core::types::AccountId;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::operation::get_caller_identity::GetCallerIdentityOutput;

/// [`CallerIdentityApi`] backed by the STS and IAM SDK clients
pub struct CallerIdentityClient {
    sts: aws_sdk_sts::Client,
    iam: aws_sdk_iam::Client,
}

impl CallerIdentityClient {
    /// Create a new client from a loaded SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            sts: aws_sdk_sts::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
        }
    }
}

#[async_trait]
impl CallerIdentityApi for CallerIdentityClient {
    async fn caller_account_id(&self) -> Result<AccountId> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| AcosError::Aws {
                operation: "GetCallerIdentity",
                message: aws_sdk_sts::error::DisplayErrorContext(&e).to_string(),
            })?;

        account_id_from(&output)
    }

    async fn account_aliases(&self) -> Result<Vec<String>> {
        let output = self
            .iam
            .list_account_aliases()
            .send()
            .await
            .map_err(|e| AcosError::Aws {
                operation: "ListAccountAliases",
                message: aws_sdk_iam::error::DisplayErrorContext(&e).to_string(),
            })?;

        Ok(output.account_aliases().to_vec())
    }
}

fn account_id_from(output: &GetCallerIdentityOutput) -> Result<AccountId> {
    output
        .account()
        .map(AccountId::new)
        .ok_or_else(|| AcosError::Aws {
            operation: "GetCallerIdentity",
            message: "response did not include an account ID".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_from_response() {
        let output = GetCallerIdentityOutput::builder()
            .account("123456789012")
            .arn("arn:aws:iam::123456789012:user/ci")
            .build();

        assert_eq!(
            account_id_from(&output).unwrap(),
            AccountId::new("123456789012")
        );
    }

    #[test]
    fn test_missing_account_id() {
        let output = GetCallerIdentityOutput::builder().build();

        let err = account_id_from(&output).unwrap_err();
        assert!(matches!(
            err,
            AcosError::Aws {
                operation: "GetCallerIdentity",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "AWS GetCallerIdentity failed: response did not include an account ID"
        );
    }
}
