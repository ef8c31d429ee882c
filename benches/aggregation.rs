use acos::aggregation::{CostAggregator, GetCostsOptions};
use acos_core::api::{AccountCost, CostExplorerApi, CostPage, CostQuery, DailyCost};
use acos_core::types::{Account, Accounts};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

/// Serves a fixed set of pages, selected by the page token
struct PagedCostExplorer {
    pages: Vec<CostPage>,
}

#[async_trait]
impl CostExplorerApi for PagedCostExplorer {
    async fn get_cost_and_usage(
        &self,
        _query: &CostQuery,
        next_page_token: Option<&str>,
    ) -> acos::Result<CostPage> {
        let index = next_page_token
            .and_then(|token| token.parse::<usize>().ok())
            .unwrap_or(0);
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}

fn create_accounts(count: usize) -> Accounts {
    (0..count)
        .map(|i| {
            let account = Account::new(format!("{:012}", 100_000_000_000 + i), format!("acct-{i}"));
            (account.id.clone(), account)
        })
        .collect()
}

/// Daily buckets from `start` to `end`, every account billed every day,
/// split into pages of `days_per_page` buckets
fn create_pages(
    accounts: &Accounts,
    start: NaiveDate,
    end: NaiveDate,
    days_per_page: usize,
) -> Vec<CostPage> {
    let days = (end - start).num_days() as u64;
    let buckets: Vec<DailyCost> = (0..days)
        .map(|offset| {
            let day = start + Days::new(offset);
            DailyCost {
                start: day,
                end: day + Days::new(1),
                groups: accounts
                    .keys()
                    .enumerate()
                    .map(|(i, id)| AccountCost {
                        account_id: id.clone(),
                        amount: (i as f64) * 0.37 + (offset as f64),
                    })
                    .collect(),
            }
        })
        .collect();

    let chunks: Vec<&[DailyCost]> = buckets.chunks(days_per_page).collect();
    let last = chunks.len().saturating_sub(1);
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| CostPage {
            results_by_time: chunk.to_vec(),
            next_page_token: (i < last).then(|| (i + 1).to_string()),
        })
        .collect()
}

fn benchmark_get_costs(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("get_costs");
    group.sample_size(20);

    let as_of = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let options = GetCostsOptions::new(as_of).unwrap();

    for account_count in [10usize, 200] {
        let accounts = create_accounts(account_count);
        let pages = create_pages(
            &accounts,
            options.dates.first_day_of_last_month,
            as_of,
            7,
        );
        let aggregator = CostAggregator::new(Arc::new(PagedCostExplorer { pages }));

        group.bench_function(format!("{account_count}_accounts_60_days"), |b| {
            b.iter(|| {
                runtime.block_on(async {
                    let _result = aggregator
                        .get_costs(black_box(&accounts), black_box(&options))
                        .await
                        .unwrap();
                });
            });
        });
    }

    group.finish();
}

fn benchmark_unrequested_accounts(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let as_of = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let options = GetCostsOptions::new(as_of).unwrap();
    let billed = create_accounts(100);
    let pages = create_pages(&billed, options.dates.first_day_of_last_month, as_of, 60);
    let aggregator = CostAggregator::new(Arc::new(PagedCostExplorer { pages }));

    // Request only a handful of the billed accounts
    let requested: Accounts = billed
        .iter()
        .take(5)
        .map(|(id, account)| (id.clone(), account.clone()))
        .collect();

    c.bench_function("get_costs_mostly_unrequested", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let _result = aggregator
                    .get_costs(black_box(&requested), black_box(&options))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, benchmark_get_costs, benchmark_unrequested_accounts);
criterion_main!(benches);
