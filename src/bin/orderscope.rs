//! Terminal dashboard over an e-commerce transaction table
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin orderscope -- --data dashboard/main_data.csv
//! cargo run --release --bin orderscope -- --data data/orders.db --grouping year_month
//! ```
//!
//! ## Environment Variables
//!
//! - ORDERSCOPE_DATA_PATH - Input file (default: dashboard/main_data.csv)
//! - ORDERSCOPE_SOURCE - csv or sqlite (default: inferred from extension)
//! - ORDERSCOPE_MONTH_GROUPING - month or year_month (default: month)
//! - ORDERSCOPE_START_DATE / ORDERSCOPE_END_DATE - Initial range, YYYY-MM-DD (default: table bounds)
//! - ORDERSCOPE_TOP_N - Rows in the state and city bar charts (default: 10)
//! - RUST_LOG - Logging level (optional, default: info)

use orderscope::aggregator_core::load_table;
use orderscope::config::DashboardConfig;
use orderscope::state::DashboardState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG may come from .env
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = DashboardConfig::from_env()?;

    log::info!("🚀 Starting orderscope dashboard");
    log::info!("   Data: {} ({})", config.data_path.display(), config.source.as_str());
    log::info!("   Month grouping: {}", config.grouping.as_str());

    let table = match load_table(config.source, &config.data_path) {
        Ok(table) => table,
        Err(e) => {
            if e.is_malformed_input() {
                log::error!("❌ Input file rejected: {}", e);
            } else {
                log::error!("❌ Failed to load {}: {}", config.data_path.display(), e);
            }
            return Err(e.into());
        }
    };

    let mut state = DashboardState::new(table, &config)?;
    orderscope::ui::run_ui(&mut state)?;

    log::info!("👋 Dashboard closed");
    Ok(())
}
