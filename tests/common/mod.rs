//! Common test utilities and helpers for acos tests
//!
//! In-memory fakes for the AWS API traits and the account prompt, plus
//! helpers to build buckets and accounts.

use acos::{
    accounts::AccountResolver, aggregation::CostAggregator, report::Reporter,
    selector::AccountPrompt,
};
use acos_core::api::{
    AccountCost, AccountPage, CallerIdentityApi, CostExplorerApi, CostPage, CostQuery, DailyCost,
    OrganizationsApi,
};
use acos_core::error::{AcosError, Result};
use acos_core::types::{Account, AccountId, Accounts};
use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Sets an environment variable and restores the previous value on drop
///
/// Hold [`ENV_MUTEX`] for as long as the guard lives.
#[allow(dead_code)]
pub struct EnvVarGuard {
    key: &'static str,
    original: Option<String>,
}

#[allow(dead_code)]
impl EnvVarGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // Note: env functions are unsafe in Rust 2024; callers hold ENV_MUTEX
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, original }
    }

    pub fn remove(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A one-day bucket starting at `start`
#[allow(dead_code)]
pub fn bucket(start: NaiveDate, groups: &[(&str, f64)]) -> DailyCost {
    DailyCost {
        start,
        end: start.succ_opt().unwrap(),
        groups: groups
            .iter()
            .map(|(id, amount)| AccountCost {
                account_id: AccountId::new(*id),
                amount: *amount,
            })
            .collect(),
    }
}

#[allow(dead_code)]
pub fn accounts(entries: &[(&str, &str)]) -> Accounts {
    entries
        .iter()
        .map(|(id, name)| (AccountId::new(*id), Account::new(*id, *name)))
        .collect()
}

/// Cost Explorer fake serving pages in order
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeCostExplorer {
    pub pages: Vec<CostPage>,
    pub error: Option<String>,
    pub requests: Mutex<Vec<(CostQuery, Option<String>)>>,
}

#[allow(dead_code)]
impl FakeCostExplorer {
    pub fn with_pages(pages: Vec<CostPage>) -> Arc<Self> {
        Arc::new(Self {
            pages,
            ..Default::default()
        })
    }

    pub fn with_buckets(buckets: Vec<DailyCost>) -> Arc<Self> {
        Self::with_pages(vec![CostPage {
            results_by_time: buckets,
            next_page_token: None,
        }])
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            error: Some(message.to_string()),
            ..Default::default()
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CostExplorerApi for FakeCostExplorer {
    async fn get_cost_and_usage(
        &self,
        query: &CostQuery,
        next_page_token: Option<&str>,
    ) -> Result<CostPage> {
        let mut requests = self.requests.lock().unwrap();
        requests.push((query.clone(), next_page_token.map(str::to_string)));
        if let Some(message) = &self.error {
            return Err(AcosError::Aws {
                operation: "GetCostAndUsage",
                message: message.clone(),
            });
        }
        Ok(self
            .pages
            .get(requests.len() - 1)
            .cloned()
            .unwrap_or_default())
    }
}

/// What the Organizations fake answers with
#[allow(dead_code)]
pub enum OrganizationsBehavior {
    Accounts(Vec<Account>),
    NotInUse,
    AccessDenied,
    ParentNotFound,
}

#[allow(dead_code)]
pub struct FakeOrganizations {
    pub behavior: OrganizationsBehavior,
    pub calls: Mutex<usize>,
}

#[allow(dead_code)]
impl FakeOrganizations {
    pub fn new(behavior: OrganizationsBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(0),
        })
    }

    fn answer(&self, operation: &'static str, parent_id: Option<&str>) -> Result<AccountPage> {
        *self.calls.lock().unwrap() += 1;
        match &self.behavior {
            OrganizationsBehavior::Accounts(accounts) => Ok(AccountPage {
                accounts: accounts.clone(),
                next_token: None,
            }),
            OrganizationsBehavior::NotInUse => Err(AcosError::OrganizationsNotInUse),
            OrganizationsBehavior::AccessDenied => {
                Err(AcosError::OrganizationsAccessDenied { operation })
            }
            OrganizationsBehavior::ParentNotFound => Err(AcosError::OuNotFound(
                parent_id.unwrap_or_default().to_string(),
            )),
        }
    }
}

#[async_trait]
impl OrganizationsApi for FakeOrganizations {
    async fn list_accounts(&self, _next_token: Option<&str>) -> Result<AccountPage> {
        self.answer("ListAccounts", None)
    }

    async fn list_accounts_for_parent(
        &self,
        parent_id: &str,
        _next_token: Option<&str>,
    ) -> Result<AccountPage> {
        self.answer("ListAccountsForParent", Some(parent_id))
    }
}

#[allow(dead_code)]
pub struct FakeCallerIdentity {
    pub account_id: &'static str,
    pub aliases: Vec<String>,
}

#[allow(dead_code)]
impl FakeCallerIdentity {
    pub fn new(account_id: &'static str, aliases: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            account_id,
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        })
    }
}

#[async_trait]
impl CallerIdentityApi for FakeCallerIdentity {
    async fn caller_account_id(&self) -> Result<AccountId> {
        Ok(AccountId::new(self.account_id))
    }

    async fn account_aliases(&self) -> Result<Vec<String>> {
        Ok(self.aliases.clone())
    }
}

/// Prompt answering with fixed indices
#[allow(dead_code)]
pub struct ScriptedPrompt {
    pub picks: Vec<usize>,
}

impl AccountPrompt for ScriptedPrompt {
    fn multi_select(&self, _message: &str, _items: &[String]) -> Result<Vec<usize>> {
        Ok(self.picks.clone())
    }
}

/// Wire a reporter from fakes
#[allow(dead_code)]
pub fn reporter(
    organizations: Arc<FakeOrganizations>,
    caller_identity: Arc<FakeCallerIdentity>,
    cost_explorer: Arc<FakeCostExplorer>,
    picks: &[usize],
) -> Reporter {
    Reporter::new(
        AccountResolver::new(organizations, caller_identity),
        CostAggregator::new(cost_explorer),
        Box::new(ScriptedPrompt {
            picks: picks.to_vec(),
        }),
    )
}
