//! The five summary aggregators
//!
//! Each function is pure: it reads a transaction table and returns a freshly
//! built summary table. Grouping uses ordered maps so output order is stable
//! regardless of input order.

use super::normalizer::TransactionRecord;
use super::summary::{
    CityCustomerCount, DailyOrderCount, MonthlyCustomerCount, MonthlyOrderCount, StateCustomerCount,
};
use super::table::TransactionTable;
use super::window::{MonthBucket, MonthGrouping};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Group `table` by `key`, collecting the distinct `value`s of each group
fn distinct_by<'a, K, F, V>(table: &'a TransactionTable, key: F, value: V) -> BTreeMap<K, HashSet<&'a str>>
where
    K: Ord,
    F: Fn(&'a TransactionRecord) -> Option<K>,
    V: Fn(&'a TransactionRecord) -> &'a str,
{
    let mut groups: BTreeMap<K, HashSet<&'a str>> = BTreeMap::new();
    for record in table {
        if let Some(k) = key(record) {
            groups.entry(k).or_default().insert(value(record));
        }
    }
    groups
}

/// Distinct orders per approval day
///
/// Rows without an approval timestamp belong to no day. Days without rows
/// are omitted, not zero-filled.
pub fn daily_order_counts(table: &TransactionTable) -> Vec<DailyOrderCount> {
    distinct_by::<NaiveDate, _, _>(table, |r| r.approved_day(), |r| r.order_id.as_str())
        .into_iter()
        .map(|(day, orders)| DailyOrderCount {
            day,
            order_count: orders.len(),
        })
        .collect()
}

/// Distinct customers per city (exact string match, no normalization)
pub fn city_customer_counts(table: &TransactionTable) -> Vec<CityCustomerCount> {
    distinct_by(table, |r| Some(r.customer_city.as_str()), |r| r.customer_id.as_str())
        .into_iter()
        .map(|(city, customers)| CityCustomerCount {
            city: city.to_string(),
            customer_count: customers.len(),
        })
        .collect()
}

/// Distinct customers per state (exact string match, no normalization)
pub fn state_customer_counts(table: &TransactionTable) -> Vec<StateCustomerCount> {
    distinct_by(table, |r| Some(r.customer_state.as_str()), |r| r.customer_id.as_str())
        .into_iter()
        .map(|(state, customers)| StateCustomerCount {
            state: state.to_string(),
            customer_count: customers.len(),
        })
        .collect()
}

/// Distinct customers per purchase month
///
/// Under `MonthGrouping::MonthName` January 2023 and January 2024 land in the
/// same "January" row.
pub fn monthly_customer_counts(table: &TransactionTable, grouping: MonthGrouping) -> Vec<MonthlyCustomerCount> {
    distinct_by::<MonthBucket, _, _>(
        table,
        |r| Some(grouping.bucket(r.purchased_at)),
        |r| r.customer_id.as_str(),
    )
    .into_iter()
    .map(|(bucket, customers)| MonthlyCustomerCount {
        month: bucket.label(),
        customer_count: customers.len(),
    })
    .collect()
}

/// Distinct orders per purchase month, same buckets as `monthly_customer_counts`
pub fn monthly_order_counts(table: &TransactionTable, grouping: MonthGrouping) -> Vec<MonthlyOrderCount> {
    distinct_by::<MonthBucket, _, _>(
        table,
        |r| Some(grouping.bucket(r.purchased_at)),
        |r| r.order_id.as_str(),
    )
    .into_iter()
    .map(|(bucket, orders)| MonthlyOrderCount {
        month: bucket.label(),
        order_count: orders.len(),
    })
    .collect()
}
