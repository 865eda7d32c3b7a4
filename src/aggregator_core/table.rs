//! Immutable transaction table and the approval-date filter

use super::normalizer::TransactionRecord;
use super::window::DateRange;
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, read-only snapshot of transaction records
///
/// Rows are sorted ascending by approval timestamp; rows that were never
/// approved sort last. Cloning shares the underlying rows.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    records: Arc<[TransactionRecord]>,
}

impl TransactionTable {
    pub fn from_records(mut records: Vec<TransactionRecord>) -> Self {
        records.sort_unstable_by(|a, b| match (a.approved_at, b.approved_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Default filter range: earliest to latest approval date
    ///
    /// `None` when no row carries an approval timestamp.
    pub fn approval_bounds(&self) -> Option<DateRange> {
        let mut days = self.records.iter().filter_map(|r| r.approved_day());
        let first = days.next()?;
        let (min, max) = days.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        DateRange::new(min, max).ok()
    }

    /// Rows whose approval date falls inside `range`
    ///
    /// An empty result is a valid table, not an error.
    pub fn filter_by_approval(&self, range: &DateRange) -> TransactionTable {
        let records: Vec<TransactionRecord> = self
            .records
            .iter()
            .filter(|r| r.approved_at.map_or(false, |ts| range.contains(ts)))
            .cloned()
            .collect();
        log::debug!(
            "Filtered {} of {} rows to range {}",
            records.len(),
            self.records.len(),
            range
        );
        // Order is already by approval; no re-sort needed.
        TransactionTable {
            records: records.into(),
        }
    }

    pub fn distinct_orders(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.order_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn distinct_customers(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Default for TransactionTable {
    fn default() -> Self {
        Self::from_records(Vec::new())
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn record(order: &str, approved: Option<NaiveDateTime>) -> TransactionRecord {
        TransactionRecord {
            order_id: order.to_string(),
            customer_id: format!("cust-{}", order),
            customer_city: "recife".to_string(),
            customer_state: "PE".to_string(),
            purchased_at: ts(2018, 1, 1, 0),
            approved_at: approved,
            delivered_carrier_at: None,
            delivered_customer_at: None,
            estimated_delivery_at: None,
        }
    }

    #[test]
    fn test_sorted_by_approval_unapproved_last() {
        let table = TransactionTable::from_records(vec![
            record("late", Some(ts(2018, 2, 1, 12))),
            record("never", None),
            record("early", Some(ts(2018, 1, 5, 9))),
        ]);
        let ids: Vec<&str> = table.iter().map(|r| r.order_id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "never"]);
    }

    #[test]
    fn test_approval_bounds() {
        let table = TransactionTable::from_records(vec![
            record("a", Some(ts(2018, 2, 1, 23))),
            record("b", None),
            record("c", Some(ts(2018, 1, 5, 1))),
        ]);
        let bounds = table.approval_bounds().unwrap();
        assert_eq!(bounds.start(), NaiveDate::from_ymd_opt(2018, 1, 5).unwrap());
        assert_eq!(bounds.end(), NaiveDate::from_ymd_opt(2018, 2, 1).unwrap());

        let unapproved = TransactionTable::from_records(vec![record("x", None)]);
        assert!(unapproved.approval_bounds().is_none());
        assert!(TransactionTable::default().approval_bounds().is_none());
    }

    #[test]
    fn test_filter_inclusive_end_day() {
        let table = TransactionTable::from_records(vec![
            record("a", Some(ts(2018, 1, 1, 8))),
            record("b", Some(ts(2018, 1, 2, 23))),
            record("c", Some(ts(2018, 1, 3, 0))),
            record("d", None),
        ]);
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
        )
        .unwrap();

        let filtered = table.filter_by_approval(&range);
        let ids: Vec<&str> = filtered.iter().map(|r| r.order_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_filter_to_empty_range_is_empty_table() {
        let table = TransactionTable::from_records(vec![record("a", Some(ts(2018, 1, 1, 8)))]);
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
        )
        .unwrap();
        assert!(table.filter_by_approval(&range).is_empty());
    }

    #[test]
    fn test_distinct_counts() {
        let mut repeated = record("a", None);
        repeated.customer_id = "cust-b".to_string();
        let table = TransactionTable::from_records(vec![
            record("a", None),
            repeated,
            record("b", None),
        ]);
        assert_eq!(table.distinct_orders(), 2);
        assert_eq!(table.distinct_customers(), 2);
    }
}
