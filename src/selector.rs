//! Interactive account selection

use acos_core::error::{AcosError, Result};
use acos_core::types::{Account, Accounts};
use dialoguer::MultiSelect;
use dialoguer::theme::ColorfulTheme;

/// Number of items visible at once in the selection prompt
pub const PAGE_SIZE: usize = 10;

const PROMPT: &str = "Select accounts:";

/// A multi-choice prompt
pub trait AccountPrompt {
    /// Show `items` and return the indices the user picked
    fn multi_select(&self, message: &str, items: &[String]) -> Result<Vec<usize>>;
}

/// Terminal prompt backed by `dialoguer`
pub struct InteractivePrompt;

impl AccountPrompt for InteractivePrompt {
    fn multi_select(&self, message: &str, items: &[String]) -> Result<Vec<usize>> {
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(items)
            .max_length(PAGE_SIZE)
            .interact()
            .map_err(|e| AcosError::Prompt(e.to_string()))
    }
}

/// Narrow `accounts` down to the ones the user wants
///
/// A single account is returned as is without prompting. Choices are listed
/// as `"<id> - <name>"`, sorted by name.
pub fn select_accounts(accounts: Accounts, prompt: &dyn AccountPrompt) -> Result<Accounts> {
    if accounts.is_empty() {
        return Err(AcosError::NoAccountsFound);
    }
    if accounts.len() == 1 {
        return Ok(accounts);
    }

    let mut choices: Vec<Account> = accounts.into_values().collect();
    choices.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    let items: Vec<String> = choices
        .iter()
        .map(|account| format!("{} - {}", account.id, account.name))
        .collect();

    let picked = prompt.multi_select(PROMPT, &items)?;

    let selected: Accounts = picked
        .into_iter()
        .filter_map(|index| choices.get(index))
        .map(|account| (account.id.clone(), account.clone()))
        .collect();

    if selected.is_empty() {
        return Err(AcosError::NoAccountsSelected);
    }
    Ok(selected)
}
