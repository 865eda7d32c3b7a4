//! Aggregator Core - Transaction Summary Engine
//!
//! Turns a flat e-commerce transaction table into the five summary tables the
//! dashboard renders.
//!
//! # Architecture
//!
//! ```text
//! CSV file / SQLite file → TransactionLoader → TransactionTable (sorted by approval)
//!     ↓
//! filter_by_approval(DateRange)   (inclusive calendar dates)
//!     ↓
//! aggregators (daily orders, city / state customers, monthly customers / orders)
//!     ↓
//! SummaryTables → terminal dashboard or JSON report
//! ```
//!
//! Every stage is a pure function over an immutable value; a range change
//! re-runs filter and aggregation in full.

pub mod aggregators;
pub mod normalizer;
pub mod reader;
pub mod reader_backend;
pub mod source;
pub mod sqlite_reader;
pub mod summary;
pub mod table;
pub mod window;

pub use aggregators::{
    city_customer_counts, daily_order_counts, monthly_customer_counts, monthly_order_counts,
    state_customer_counts,
};
pub use normalizer::{TransactionRecord, REQUIRED_COLUMNS};
pub use reader::CsvTransactionReader;
pub use reader_backend::{LoadError, TransactionSource};
pub use source::{load_table, SourceKind, TransactionLoader};
pub use sqlite_reader::SqliteTransactionReader;
pub use summary::{
    top_n_by_count, CityCustomerCount, Counted, DailyOrderCount, MonthlyCustomerCount, MonthlyOrderCount,
    StateCustomerCount, SummaryTables,
};
pub use table::TransactionTable;
pub use window::{DateRange, MonthBucket, MonthGrouping, RangeError};
