//! End-to-end report flow
//!
//! Validates the request, resolves and selects accounts, retrieves their
//! costs and renders the result. Each step reports failures tagged with the
//! stage it failed in, which determines the process exit code.

use crate::accounts::{AccountResolver, AccountScope};
use crate::aggregation::{CostAggregator, GetCostsOptions};
use crate::cli::Cli;
use crate::selector::{AccountPrompt, select_accounts};
use acos_core::error::AcosError;
use acos_core::types::{ComparedTo, RecordTypeExclusions};
use acos_terminal::output::get_formatter;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

/// The step a report failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    AsOf,
    ComparedTo,
    AccountResolution,
    AccountSelection,
    CostRetrieval,
    Output,
}

impl FailureStage {
    /// Process exit code for a failure in this stage
    pub fn exit_code(self) -> u8 {
        match self {
            FailureStage::AsOf => 1,
            FailureStage::ComparedTo => 2,
            FailureStage::AccountResolution => 3,
            FailureStage::AccountSelection => 4,
            FailureStage::CostRetrieval => 5,
            FailureStage::Output => 6,
        }
    }
}

/// An [`AcosError`] tagged with the stage it happened in
#[derive(Error, Debug)]
#[error("{source}")]
pub struct StageError {
    pub stage: FailureStage,
    #[source]
    pub source: AcosError,
}

impl StageError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        self.stage.exit_code()
    }
}

/// Tag a result's error with a stage
pub trait StageExt<T> {
    fn at(self, stage: FailureStage) -> Result<T, StageError>;
}

impl<T> StageExt<T> for acos_core::Result<T> {
    fn at(self, stage: FailureStage) -> Result<T, StageError> {
        self.map_err(|source| StageError { stage, source })
    }
}

/// A validated report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub scope: AccountScope,
    pub as_of: NaiveDate,
    pub compared_to: ComparedTo,
    pub exclusions: RecordTypeExclusions,
    pub json: bool,
}

impl ReportRequest {
    /// Validate the command line, defaulting the as-of date to `today`
    pub fn from_cli(cli: &Cli, today: NaiveDate) -> Result<Self, StageError> {
        let as_of = cli.as_of_date(today).at(FailureStage::AsOf)?;
        let compared_to = cli.compared_to().at(FailureStage::ComparedTo)?;

        Ok(Self {
            scope: cli.account_scope(),
            as_of,
            compared_to,
            exclusions: cli.record_type_exclusions(),
            json: cli.json,
        })
    }
}

/// Runs a report against injected API clients and prompt
pub struct Reporter {
    resolver: AccountResolver,
    aggregator: CostAggregator,
    prompt: Box<dyn AccountPrompt>,
}

impl Reporter {
    /// Create a new Reporter
    pub fn new(
        resolver: AccountResolver,
        aggregator: CostAggregator,
        prompt: Box<dyn AccountPrompt>,
    ) -> Self {
        Self {
            resolver,
            aggregator,
            prompt,
        }
    }

    /// Produce the rendered report
    pub async fn run(&self, request: &ReportRequest) -> Result<String, StageError> {
        let accounts = self
            .resolver
            .resolve(&request.scope)
            .await
            .at(FailureStage::AccountResolution)?;
        info!("Resolved {} accounts", accounts.len());

        let selected =
            select_accounts(accounts, self.prompt.as_ref()).at(FailureStage::AccountSelection)?;

        let options = GetCostsOptions::new(request.as_of)
            .at(FailureStage::CostRetrieval)?
            .with_exclusions(request.exclusions);
        let costs = self
            .aggregator
            .get_costs(&selected, &options)
            .await
            .at(FailureStage::CostRetrieval)?;

        get_formatter(request.json)
            .format_costs(&costs, request.as_of, request.compared_to)
            .at(FailureStage::Output)
    }
}
