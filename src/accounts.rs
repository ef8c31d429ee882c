//! Account discovery
//!
//! Resolves which accounts a report covers: the whole organization, the
//! direct children of an OU, or an explicit list of IDs. When Organizations
//! is disabled or off-limits for the caller, the caller's own account is
//! used instead.

use acos_core::api::{AccountPage, CallerIdentityApi, OrganizationsApi};
use acos_core::error::Result;
use acos_core::types::{Account, Accounts};
use std::sync::Arc;
use tracing::{info, warn};

/// Display name for an account without an IAM alias
pub const NAME_NOT_CONFIGURED: &str = "Name not configured";

/// Which accounts to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountScope {
    /// Fixed account IDs, used as their own names; no API calls
    Debug(Vec<String>),
    /// Direct-child accounts of an OU or root
    OrganizationalUnit(String),
    /// Every account of the organization
    Organization,
}

/// Resolves an [`AccountScope`] into accounts
pub struct AccountResolver {
    organizations: Arc<dyn OrganizationsApi>,
    caller_identity: Arc<dyn CallerIdentityApi>,
}

impl AccountResolver {
    /// Create a new AccountResolver
    pub fn new(
        organizations: Arc<dyn OrganizationsApi>,
        caller_identity: Arc<dyn CallerIdentityApi>,
    ) -> Self {
        Self {
            organizations,
            caller_identity,
        }
    }

    /// Resolve the accounts for a scope
    pub async fn resolve(&self, scope: &AccountScope) -> Result<Accounts> {
        let listed = match scope {
            AccountScope::Debug(ids) => return Ok(debug_accounts(ids)),
            AccountScope::OrganizationalUnit(ou_id) => {
                info!("Listing accounts under {}", ou_id);
                let organizations = &self.organizations;
                collect_pages(|token| async move {
                    organizations
                        .list_accounts_for_parent(ou_id, token.as_deref())
                        .await
                })
                .await
            }
            AccountScope::Organization => {
                info!("Listing accounts of the organization");
                let organizations = &self.organizations;
                collect_pages(|token| async move {
                    organizations.list_accounts(token.as_deref()).await
                })
                .await
            }
        };

        match listed {
            Err(e) if e.allows_caller_identity_fallback() => {
                warn!("{}; using the caller's own account instead", e);
                let account = self.caller_account().await?;
                Ok(Accounts::from([(account.id.clone(), account)]))
            }
            other => other,
        }
    }

    /// The caller's account, named after its first IAM alias
    async fn caller_account(&self) -> Result<Account> {
        let id = self.caller_identity.caller_account_id().await?;
        let aliases = self.caller_identity.account_aliases().await?;
        let name = aliases
            .into_iter()
            .next()
            .unwrap_or_else(|| NAME_NOT_CONFIGURED.to_string());
        Ok(Account { id, name })
    }
}

fn debug_accounts(ids: &[String]) -> Accounts {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(|id| {
            let account = Account::new(id, id);
            (account.id.clone(), account)
        })
        .collect()
}

/// Follow `next_token` until the listing is exhausted
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Accounts>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<AccountPage>>,
{
    let mut accounts = Accounts::new();
    let mut next_token = None;
    loop {
        let page = fetch(next_token.take()).await?;
        accounts.extend(
            page.accounts
                .into_iter()
                .map(|account| (account.id.clone(), account)),
        );
        match page.next_token.filter(|token| !token.is_empty()) {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }
    Ok(accounts)
}
