//! Phone-billing runner - replays a call dataset and prints monthly statements.

use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phone_billing_runner::{BillingRun, Dataset, MonthlyStatement, RunnerConfig, Settlement};

#[derive(Serialize)]
struct Report<'a> {
    statements: &'a [MonthlyStatement],
    settlements: Vec<Settlement>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays a clean JSON report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,phone_billing=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = RunnerConfig::from_env()?;
    tracing::info!(
        dataset = %config.dataset_path.display(),
        cancellations = config.cancel_numbers.len(),
        "Runner configuration loaded"
    );

    let dataset = Dataset::load(&config.dataset_path)?;
    let mut run = BillingRun::new(&dataset, &config.rates)?;
    run.process(dataset.calls())?;

    let settlements = config
        .cancel_numbers
        .iter()
        .map(|number| run.cancel_line(number))
        .collect::<Result<Vec<_>, _>>()?;

    let report = Report {
        statements: run.statements(),
        settlements,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
