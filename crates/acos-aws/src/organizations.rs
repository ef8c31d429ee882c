//! AWS Organizations client
//!
//! Service errors that the account resolver reacts to are classified here;
//! everything else is reported with the SDK's full error context.

use acos_core::api::{AccountPage, OrganizationsApi};
use acos_core::error::{AcosError, Result};
use acos_core::types::Account;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_organizations::Client;
use aws_sdk_organizations::error::{DisplayErrorContext, SdkError};
use aws_sdk_organizations::operation::list_accounts::ListAccountsError;
use aws_sdk_organizations::operation::list_accounts_for_parent::ListAccountsForParentError;
use aws_sdk_organizations::types::Account as SdkAccount;
use tracing::debug;

const LIST_ACCOUNTS: &str = "ListAccounts";
const LIST_ACCOUNTS_FOR_PARENT: &str = "ListAccountsForParent";

/// [`OrganizationsApi`] backed by the AWS SDK
pub struct OrganizationsClient {
    client: Client,
}

impl OrganizationsClient {
    /// Create a new client from a loaded SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl OrganizationsApi for OrganizationsClient {
    async fn list_accounts(&self, next_token: Option<&str>) -> Result<AccountPage> {
        let output = self
            .client
            .list_accounts()
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(list_accounts_error)?;

        Ok(AccountPage {
            accounts: to_accounts(output.accounts()),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn list_accounts_for_parent(
        &self,
        parent_id: &str,
        next_token: Option<&str>,
    ) -> Result<AccountPage> {
        let output = self
            .client
            .list_accounts_for_parent()
            .parent_id(parent_id)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| list_accounts_for_parent_error(parent_id, e))?;

        Ok(AccountPage {
            accounts: to_accounts(output.accounts()),
            next_token: output.next_token().map(str::to_string),
        })
    }
}

fn to_accounts(accounts: &[SdkAccount]) -> Vec<Account> {
    accounts
        .iter()
        .filter_map(|account| {
            let Some(id) = account.id() else {
                debug!("Skipping account without an ID: {:?}", account.name());
                return None;
            };
            Some(Account::new(id, account.name().unwrap_or(id)))
        })
        .collect()
}

fn list_accounts_error(err: SdkError<ListAccountsError>) -> AcosError {
    match err.as_service_error() {
        Some(e) if e.is_aws_organizations_not_in_use_exception() => {
            AcosError::OrganizationsNotInUse
        }
        Some(e) if e.is_access_denied_exception() => AcosError::OrganizationsAccessDenied {
            operation: LIST_ACCOUNTS,
        },
        _ => AcosError::Aws {
            operation: LIST_ACCOUNTS,
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}

fn list_accounts_for_parent_error(
    parent_id: &str,
    err: SdkError<ListAccountsForParentError>,
) -> AcosError {
    match err.as_service_error() {
        Some(e) if e.is_parent_not_found_exception() => {
            AcosError::OuNotFound(parent_id.to_string())
        }
        Some(e) if e.is_aws_organizations_not_in_use_exception() => {
            AcosError::OrganizationsNotInUse
        }
        Some(e) if e.is_access_denied_exception() => AcosError::OrganizationsAccessDenied {
            operation: LIST_ACCOUNTS_FOR_PARENT,
        },
        _ => AcosError::Aws {
            operation: LIST_ACCOUNTS_FOR_PARENT,
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}
