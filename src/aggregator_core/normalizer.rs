//! Transaction normalization from raw tabular rows to the typed `TransactionRecord`

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Columns every input source must provide
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "order_id",
    "customer_id",
    "customer_city",
    "customer_state",
    "order_purchase_timestamp",
    "order_approved_at",
    "order_delivered_carrier_date",
    "order_delivered_customer_date",
    "order_estimated_delivery_date",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// One validated row of the transaction table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub order_id: String,
    pub customer_id: String,
    pub customer_city: String,
    pub customer_state: String,
    pub purchased_at: NaiveDateTime,
    pub approved_at: Option<NaiveDateTime>,
    pub delivered_carrier_at: Option<NaiveDateTime>,
    pub delivered_customer_at: Option<NaiveDateTime>,
    pub estimated_delivery_at: Option<NaiveDateTime>,
}

/// Raw row as it appears in the input, before timestamp parsing
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransactionRow {
    pub order_id: String,
    pub customer_id: String,
    pub customer_city: String,
    pub customer_state: String,
    pub order_purchase_timestamp: String,
    #[serde(default)]
    pub order_approved_at: Option<String>,
    #[serde(default)]
    pub order_delivered_carrier_date: Option<String>,
    #[serde(default)]
    pub order_delivered_customer_date: Option<String>,
    #[serde(default)]
    pub order_estimated_delivery_date: Option<String>,
}

/// Error produced while normalizing a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: &'static str,
    pub value: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "column '{}' has unparseable timestamp '{}'", self.column, self.value)
    }
}

impl std::error::Error for FieldError {}

impl RawTransactionRow {
    /// Parse timestamps and produce a typed record
    pub fn normalize(self) -> Result<TransactionRecord, FieldError> {
        let purchased_at = parse_required("order_purchase_timestamp", &self.order_purchase_timestamp)?;

        Ok(TransactionRecord {
            order_id: self.order_id,
            customer_id: self.customer_id,
            customer_city: self.customer_city,
            customer_state: self.customer_state,
            purchased_at,
            approved_at: parse_optional("order_approved_at", self.order_approved_at.as_deref())?,
            delivered_carrier_at: parse_optional(
                "order_delivered_carrier_date",
                self.order_delivered_carrier_date.as_deref(),
            )?,
            delivered_customer_at: parse_optional(
                "order_delivered_customer_date",
                self.order_delivered_customer_date.as_deref(),
            )?,
            estimated_delivery_at: parse_optional(
                "order_estimated_delivery_date",
                self.order_estimated_delivery_date.as_deref(),
            )?,
        })
    }
}

impl TransactionRecord {
    /// Calendar day of approval, if the order was approved
    pub fn approved_day(&self) -> Option<NaiveDate> {
        self.approved_at.map(|ts| ts.date())
    }
}

/// Parse a timestamp cell in any of the accepted layouts
///
/// A bare date is read as midnight of that day.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_required(column: &'static str, value: &str) -> Result<NaiveDateTime, FieldError> {
    parse_timestamp(value).ok_or_else(|| FieldError {
        column,
        value: value.to_string(),
    })
}

fn parse_optional(column: &'static str, value: Option<&str>) -> Result<Option<NaiveDateTime>, FieldError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_required(column, v).map(Some),
    }
}
