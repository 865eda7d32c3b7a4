//! Headless report: load, filter, aggregate, print the summary tables as JSON
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin report -- --data dashboard/main_data.csv --start 2018-01-01 --end 2018-03-31
//! ```
//!
//! Reads the same environment variables and arguments as the `orderscope` binary.
//! JSON goes to stdout, logs to stderr.

use orderscope::aggregator_core::{load_table, SummaryTables};
use orderscope::config::DashboardConfig;
use orderscope::state::initial_range;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG may come from .env
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = DashboardConfig::from_env()?;
    let table = load_table(config.source, &config.data_path)?;

    let range = initial_range(table.approval_bounds(), config.start_date, config.end_date)?;

    let summaries = SummaryTables::for_range(&table, range.as_ref(), config.grouping);
    log::info!(
        "📊 {} orders in {}",
        summaries.total_orders(),
        range.map(|r| r.to_string()).unwrap_or_else(|| "empty range".to_string())
    );

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
