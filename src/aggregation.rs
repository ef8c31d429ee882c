//! Cost aggregation
//!
//! Turns the paginated daily `GetCostAndUsage` results into one
//! [`CostSummary`] per requested account.
//!
//! Buckets are classified against the report dates as they arrive:
//!
//! - a bucket counts toward this month once its start reaches the first day
//!   of the month; the flag latches and is carried across pages
//! - the bucket ending on the as-of date is "yesterday" and its amount
//!   becomes the daily delta, unless the as-of date is the first of the month
//! - once this month has started and the bucket start reaches the date seven
//!   days back, every following amount adds to the weekly delta
//!
//! Cost Explorer documents `ResultsByTime` as sorted by period start. The
//! latches rely on that order.
//!
//! # Examples
//!
//! ```no_run
//! use acos::aggregation::{CostAggregator, GetCostsOptions};
//! use acos_aws::{AwsClients, load_sdk_config};
//! use acos_core::types::{Account, Accounts};
//! use chrono::NaiveDate;
//!
//! # async fn example() -> acos::Result<()> {
//! let config = load_sdk_config(None, None).await;
//! let clients = AwsClients::from_config(&config);
//! let aggregator = CostAggregator::new(clients.cost_explorer);
//!
//! let account = Account::new("123456789012", "production");
//! let accounts = Accounts::from([(account.id.clone(), account)]);
//! let options = GetCostsOptions::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())?;
//!
//! let costs = aggregator.get_costs(&accounts, &options).await?;
//! # Ok(())
//! # }
//! ```

use acos_core::api::{CostExplorerApi, CostQuery};
use acos_core::error::{AcosError, Result};
use acos_core::types::{Accounts, CostSummary, Costs, RecordTypeExclusions};
use acos_core::ReportDates;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Options for a cost retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCostsOptions {
    pub dates: ReportDates,
    pub exclusions: RecordTypeExclusions,
}

impl GetCostsOptions {
    /// Options for the given as-of date with the default record-type exclusions
    pub fn new(as_of: NaiveDate) -> Result<Self> {
        Ok(Self {
            dates: ReportDates::new(as_of)?,
            exclusions: RecordTypeExclusions::default(),
        })
    }

    /// Replace the record-type exclusions
    pub fn with_exclusions(mut self, exclusions: RecordTypeExclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// The Cost Explorer query for these options
    pub fn query(&self, accounts: &Accounts) -> CostQuery {
        CostQuery {
            start: self.dates.first_day_of_last_month,
            end: self.dates.as_of,
            account_ids: accounts.keys().cloned().collect(),
            excluded_record_types: self.exclusions.excluded(),
        }
    }
}

/// Where a bucket's amount goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BucketClass {
    this_month: bool,
    yesterday: bool,
    last_week: bool,
}

impl BucketClass {
    fn apply(self, cost: &mut CostSummary, amount: f64) {
        if self.this_month {
            cost.amount_this_month += amount;
        } else {
            cost.amount_last_month += amount;
        }
        if self.yesterday {
            cost.latest_daily_cost_increase = amount;
        }
        if self.last_week {
            cost.latest_weekly_cost_increase += amount;
        }
    }
}

/// Latching bucket classifier, fed buckets in start-date order
#[derive(Debug)]
struct BucketClassifier {
    dates: ReportDates,
    weekly_boundary: Option<NaiveDate>,
    this_month: bool,
    last_week: bool,
    last_start: Option<NaiveDate>,
}

impl BucketClassifier {
    fn new(dates: ReportDates) -> Self {
        Self {
            dates,
            weekly_boundary: dates.weekly_boundary(),
            this_month: false,
            last_week: false,
            last_start: None,
        }
    }

    fn classify(&mut self, start: NaiveDate, end: NaiveDate) -> BucketClass {
        if self.last_start.is_some_and(|previous| start < previous) {
            warn!(
                "Cost Explorer returned bucket {} after a later one; classification may be off",
                start
            );
        }
        self.last_start = Some(start);

        if !self.this_month && start >= self.dates.first_day_of_this_month {
            self.this_month = true;
        }
        if self.this_month
            && !self.last_week
            && self.weekly_boundary.is_some_and(|boundary| start >= boundary)
        {
            self.last_week = true;
        }

        BucketClass {
            this_month: self.this_month,
            yesterday: end == self.dates.as_of && !self.dates.is_first_day_of_month(),
            last_week: self.last_week,
        }
    }
}

/// Retrieves and aggregates account costs from Cost Explorer
pub struct CostAggregator {
    cost_explorer: Arc<dyn CostExplorerApi>,
    show_progress: bool,
}

impl CostAggregator {
    /// Create a new CostAggregator
    pub fn new(cost_explorer: Arc<dyn CostExplorerApi>) -> Self {
        Self {
            cost_explorer,
            show_progress: false,
        }
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Retrieve costs for the given accounts
    ///
    /// Every requested account is present in the result, with zero amounts
    /// when Cost Explorer reports nothing for it. Fails with
    /// [`AcosError::NoAccounts`] before any API call when `accounts` is empty.
    pub async fn get_costs(&self, accounts: &Accounts, options: &GetCostsOptions) -> Result<Costs> {
        if accounts.is_empty() {
            return Err(AcosError::NoAccounts);
        }

        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} pages fetched")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Retrieving costs");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let result = self.fetch_costs(accounts, options, progress.as_ref()).await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        result
    }

    async fn fetch_costs(
        &self,
        accounts: &Accounts,
        options: &GetCostsOptions,
        progress: Option<&ProgressBar>,
    ) -> Result<Costs> {
        let query = options.query(accounts);
        info!(
            "Retrieving costs for {} accounts from {} to {}",
            query.account_ids.len(),
            query.start,
            query.end
        );

        let mut costs: Costs = accounts
            .values()
            .map(|account| (account.id.clone(), CostSummary::zero(account)))
            .collect();
        let mut classifier = BucketClassifier::new(options.dates);

        let mut next_page_token: Option<String> = None;
        let mut pages = 0u64;
        loop {
            let page = self
                .cost_explorer
                .get_cost_and_usage(&query, next_page_token.as_deref())
                .await?;
            pages += 1;

            for bucket in &page.results_by_time {
                let class = classifier.classify(bucket.start, bucket.end);
                for group in &bucket.groups {
                    let Some(cost) = costs.get_mut(&group.account_id) else {
                        warn!(
                            "Ignoring costs for account {} which was not requested",
                            group.account_id
                        );
                        continue;
                    };
                    class.apply(cost, group.amount);
                }
            }

            if let Some(pb) = progress {
                pb.set_position(pages);
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        debug!("Aggregated {} pages of cost data", pages);
        Ok(costs)
    }
}
