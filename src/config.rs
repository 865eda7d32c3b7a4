use crate::aggregator_core::{MonthGrouping, SourceKind};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration loaded from environment variables and command-line overrides
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Input file (CSV or SQLite)
    pub data_path: PathBuf,

    /// Backend used to read `data_path`
    pub source: SourceKind,

    /// Monthly bucketing; month-name only by default
    pub grouping: MonthGrouping,

    /// Initial range start; table minimum when unset
    pub start_date: Option<NaiveDate>,

    /// Initial range end; table maximum when unset
    pub end_date: Option<NaiveDate>,

    /// Rows shown in ranked bar charts
    pub top_n: usize,
}

impl DashboardConfig {
    /// Load configuration from environment variables and `std::env::args`
    ///
    /// Environment variables:
    /// - `ORDERSCOPE_DATA_PATH` (default: dashboard/main_data.csv)
    /// - `ORDERSCOPE_SOURCE` (csv | sqlite, default: inferred from extension)
    /// - `ORDERSCOPE_MONTH_GROUPING` (month | year_month, default: month)
    /// - `ORDERSCOPE_START_DATE` / `ORDERSCOPE_END_DATE` (YYYY-MM-DD, optional)
    /// - `ORDERSCOPE_TOP_N` (default: 10)
    ///
    /// Arguments `--data`, `--source`, `--grouping`, `--start`, `--end`, `--top`
    /// take precedence over the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::resolve(|key| env::var(key).ok(), &args)
    }

    /// Resolve configuration from a variable lookup and an argument list
    pub fn resolve<F>(lookup: F, args: &[String]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |flag: &str, var: &str| -> Option<String> {
            arg_value(args, flag).or_else(|| lookup(var)).filter(|v| !v.trim().is_empty())
        };

        let data_path: PathBuf = setting("--data", "ORDERSCOPE_DATA_PATH")
            .unwrap_or_else(|| "dashboard/main_data.csv".to_string())
            .into();

        let source = match setting("--source", "ORDERSCOPE_SOURCE") {
            Some(s) => SourceKind::from_str(&s)
                .ok_or_else(|| ConfigError::InvalidValue(format!("source must be csv or sqlite, got '{}'", s)))?,
            None => SourceKind::infer(&data_path),
        };

        let grouping = match setting("--grouping", "ORDERSCOPE_MONTH_GROUPING") {
            Some(s) => MonthGrouping::from_str(&s).ok_or_else(|| {
                ConfigError::InvalidValue(format!("month grouping must be month or year_month, got '{}'", s))
            })?,
            None => MonthGrouping::default(),
        };

        let start_date = setting("--start", "ORDERSCOPE_START_DATE")
            .map(|s| parse_date("start date", &s))
            .transpose()?;
        let end_date = setting("--end", "ORDERSCOPE_END_DATE")
            .map(|s| parse_date("end date", &s))
            .transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(ConfigError::InvalidValue(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
        }

        let top_n = match setting("--top", "ORDERSCOPE_TOP_N") {
            Some(s) => match s.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "top-N must be a positive integer, got '{}'",
                        s
                    )))
                }
            },
            None => 10,
        };

        Ok(Self {
            data_path,
            source,
            grouping,
            start_date,
            end_date,
            top_n,
        })
    }
}

/// Value following `flag` in the argument list; a flag with no value counts as missing
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .filter(|v| !v.starts_with("--"))
        .cloned()
}

fn parse_date(what: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidValue(format!("{} must be YYYY-MM-DD, got '{}'", what, value)))
}
