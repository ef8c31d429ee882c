//! acos - Show AWS account costs for this month, last month and the latest day or week

use acos::{
    accounts::AccountResolver,
    aggregation::CostAggregator,
    cli::Cli,
    report::{ReportRequest, Reporter},
    selector::InteractivePrompt,
};
use acos_aws::{AwsClients, load_sdk_config};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging. The verbosity flags override RUST_LOG.
    let filter = match cli.log_filter() {
        Some(directives) => tracing_subscriber::EnvFilter::new(directives),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("acos=warn")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let request = match ReportRequest::from_cli(&cli, Utc::now().date_naive()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::from(e.exit_code());
        }
    };
    info!("Running cost report as of {}", request.as_of);

    let config = load_sdk_config(cli.profile.as_deref(), cli.region.as_deref()).await;
    let clients = AwsClients::from_config(&config);

    // Only spin while a human is watching the table being built
    let show_progress = !request.json && is_terminal::is_terminal(std::io::stdout());
    let reporter = Reporter::new(
        AccountResolver::new(clients.organizations, clients.caller_identity),
        CostAggregator::new(clients.cost_explorer).with_progress(show_progress),
        Box::new(InteractivePrompt),
    );

    match reporter.run(&request).await {
        Ok(output) => {
            if request.json {
                println!("{output}");
            } else {
                print!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}
