//! Summary table rows and the per-render bundle of all five tables

use super::aggregators;
use super::table::TransactionTable;
use super::window::{DateRange, MonthGrouping};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyOrderCount {
    pub day: NaiveDate,
    pub order_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCustomerCount {
    pub city: String,
    pub customer_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCustomerCount {
    pub state: String,
    pub customer_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCustomerCount {
    pub month: String,
    pub customer_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyOrderCount {
    pub month: String,
    pub order_count: usize,
}

/// A summary row with a label and a count, for ranking and charting
pub trait Counted {
    fn key(&self) -> &str;
    fn count(&self) -> usize;
}

impl Counted for CityCustomerCount {
    fn key(&self) -> &str {
        &self.city
    }

    fn count(&self) -> usize {
        self.customer_count
    }
}

impl Counted for StateCustomerCount {
    fn key(&self) -> &str {
        &self.state
    }

    fn count(&self) -> usize {
        self.customer_count
    }
}

impl Counted for MonthlyCustomerCount {
    fn key(&self) -> &str {
        &self.month
    }

    fn count(&self) -> usize {
        self.customer_count
    }
}

impl Counted for MonthlyOrderCount {
    fn key(&self) -> &str {
        &self.month
    }

    fn count(&self) -> usize {
        self.order_count
    }
}

/// The `n` largest rows, count descending, ties broken by key ascending
pub fn top_n_by_count<T: Counted>(rows: &[T], n: usize) -> Vec<&T> {
    let mut ranked: Vec<&T> = rows.iter().collect();
    ranked.sort_by(|a, b| b.count().cmp(&a.count()).then_with(|| a.key().cmp(b.key())));
    ranked.truncate(n);
    ranked
}

/// All five summary tables computed from one filtered snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTables {
    pub grouping: MonthGrouping,
    pub daily_orders: Vec<DailyOrderCount>,
    pub city_customers: Vec<CityCustomerCount>,
    pub state_customers: Vec<StateCustomerCount>,
    pub monthly_customers: Vec<MonthlyCustomerCount>,
    pub monthly_orders: Vec<MonthlyOrderCount>,
}

impl SummaryTables {
    pub fn compute(table: &TransactionTable, grouping: MonthGrouping) -> Self {
        let summaries = Self {
            grouping,
            daily_orders: aggregators::daily_order_counts(table),
            city_customers: aggregators::city_customer_counts(table),
            state_customers: aggregators::state_customer_counts(table),
            monthly_customers: aggregators::monthly_customer_counts(table, grouping),
            monthly_orders: aggregators::monthly_order_counts(table, grouping),
        };
        log::debug!(
            "Aggregated {} rows: {} days, {} cities, {} states, {} months",
            table.len(),
            summaries.daily_orders.len(),
            summaries.city_customers.len(),
            summaries.state_customers.len(),
            summaries.monthly_orders.len()
        );
        summaries
    }

    /// Filter `table` to `range` and aggregate the result
    ///
    /// `None` selects nothing, matching a table without any approved rows.
    pub fn for_range(table: &TransactionTable, range: Option<&DateRange>, grouping: MonthGrouping) -> Self {
        match range {
            Some(range) => Self::compute(&table.filter_by_approval(range), grouping),
            None => Self::compute(&TransactionTable::default(), grouping),
        }
    }

    /// "Total orders" metric: sum of the daily distinct-order counts
    pub fn total_orders(&self) -> usize {
        self.daily_orders.iter().map(|d| d.order_count).sum()
    }

    /// True when the filtered range held no rows at all
    pub fn is_empty(&self) -> bool {
        self.daily_orders.is_empty()
            && self.city_customers.is_empty()
            && self.state_customers.is_empty()
            && self.monthly_customers.is_empty()
            && self.monthly_orders.is_empty()
    }
}
