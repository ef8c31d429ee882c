//! Cost Explorer client
//!
//! Issues `GetCostAndUsage` with daily granularity, the `UnblendedCost`
//! metric and a `LINKED_ACCOUNT` group-by, and turns each page into a
//! [`CostPage`].

use acos_core::api::{AccountCost, CostExplorerApi, CostPage, CostQuery, DailyCost};
use acos_core::dates::DATE_FORMAT;
use acos_core::error::{AcosError, Result};
use acos_core::types::AccountId;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_costexplorer::Client;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::types::{
    DateInterval, Dimension, DimensionValues, Expression, Granularity, GroupDefinition,
    GroupDefinitionType, ResultByTime,
};
use chrono::NaiveDate;
use tracing::debug;

/// Cost metric summed per bucket
pub const COST_METRIC: &str = "UnblendedCost";

const OPERATION: &str = "GetCostAndUsage";

/// [`CostExplorerApi`] backed by the AWS SDK
pub struct CostExplorerClient {
    client: Client,
}

impl CostExplorerClient {
    /// Create a new client from a loaded SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl CostExplorerApi for CostExplorerClient {
    async fn get_cost_and_usage(
        &self,
        query: &CostQuery,
        next_page_token: Option<&str>,
    ) -> Result<CostPage> {
        let time_period = DateInterval::builder()
            .start(query.start.format(DATE_FORMAT).to_string())
            .end(query.end.format(DATE_FORMAT).to_string())
            .build()
            .map_err(|e| AcosError::Aws {
                operation: OPERATION,
                message: e.to_string(),
            })?;

        debug!(
            "Requesting {} for {} accounts from {} to {}",
            OPERATION,
            query.account_ids.len(),
            query.start,
            query.end
        );

        let output = self
            .client
            .get_cost_and_usage()
            .time_period(time_period)
            .granularity(Granularity::Daily)
            .metrics(COST_METRIC)
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key(Dimension::LinkedAccount.as_str())
                    .build(),
            )
            .filter(build_filter(query))
            .set_next_page_token(next_page_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| AcosError::Aws {
                operation: OPERATION,
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let results_by_time = output
            .results_by_time()
            .iter()
            .map(daily_cost_from_result)
            .collect::<Result<Vec<_>>>()?;

        Ok(CostPage {
            results_by_time,
            next_page_token: output.next_page_token().map(str::to_string),
        })
    }
}

/// Build the query filter: the requested linked accounts, minus excluded record types
///
/// A single dimension expression is sent on its own; Cost Explorer only
/// accepts `And` with two or more operands.
pub(crate) fn build_filter(query: &CostQuery) -> Expression {
    let accounts = Expression::builder()
        .dimensions(
            DimensionValues::builder()
                .key(Dimension::LinkedAccount)
                .set_values(Some(
                    query
                        .account_ids
                        .iter()
                        .map(|id| id.as_str().to_string())
                        .collect(),
                ))
                .build(),
        )
        .build();

    if query.excluded_record_types.is_empty() {
        return accounts;
    }

    let record_types = Expression::builder()
        .dimensions(
            DimensionValues::builder()
                .key(Dimension::RecordType)
                .set_values(Some(
                    query
                        .excluded_record_types
                        .iter()
                        .map(|record_type| record_type.as_str().to_string())
                        .collect(),
                ))
                .build(),
        )
        .build();

    Expression::builder()
        .and(accounts)
        .and(Expression::builder().not(record_types).build())
        .build()
}

fn daily_cost_from_result(result: &ResultByTime) -> Result<DailyCost> {
    let period = result.time_period().ok_or_else(|| AcosError::Aws {
        operation: OPERATION,
        message: "result bucket without a time period".to_string(),
    })?;

    let groups = result
        .groups()
        .iter()
        .filter_map(|group| {
            let account_id = group.keys().first()?;
            let amount = group
                .metrics()
                .and_then(|metrics| metrics.get(COST_METRIC))
                .and_then(|metric| metric.amount());
            Some(AccountCost {
                account_id: AccountId::new(account_id.as_str()),
                amount: parse_amount(account_id, amount),
            })
        })
        .collect();

    Ok(DailyCost {
        start: parse_api_date(period.start())?,
        end: parse_api_date(period.end())?,
        groups,
    })
}

fn parse_api_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| AcosError::Aws {
        operation: OPERATION,
        message: format!("unexpected date '{value}' in response: {e}"),
    })
}

/// Parse a metric amount, counting missing or malformed values as zero
pub(crate) fn parse_amount(account_id: &str, amount: Option<&str>) -> f64 {
    match amount {
        Some(raw) => raw.parse::<f64>().unwrap_or_else(|e| {
            debug!(
                "Ignoring unparsable amount '{}' for account {}: {}",
                raw, account_id, e
            );
            0.0
        }),
        None => {
            debug!("No {} amount for account {}", COST_METRIC, account_id);
            0.0
        }
    }
}
