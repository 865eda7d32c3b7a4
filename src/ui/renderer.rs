// Renderer module - formatting utilities
// Widget construction lives in layout.rs; this module turns summary rows
// into the plain values the widgets consume.

use crate::aggregator_core::{top_n_by_count, Counted, DailyOrderCount, DateRange};

/// Format a count with thousands separators ("12,345")
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Chart points for the daily series: x = days since the first row
pub fn daily_points(rows: &[DailyOrderCount]) -> Vec<(f64, f64)> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    rows.iter()
        .map(|r| ((r.day - first.day).num_days() as f64, r.order_count as f64))
        .collect()
}

/// Chart points for a monthly series: x = bucket position
pub fn indexed_points<T: Counted>(rows: &[T]) -> Vec<(f64, f64)> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.count() as f64))
        .collect()
}

/// `[0, max]` bounds for one axis, never degenerate
pub fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let max = values.fold(0.0_f64, f64::max);
    [0.0, if max > 0.0 { max } else { 1.0 }]
}

/// Labels and values for a ranked bar chart, largest first
pub fn ranked_bars<T: Counted>(rows: &[T], n: usize) -> Vec<(String, u64)> {
    top_n_by_count(rows, n)
        .into_iter()
        .map(|r| (r.key().to_string(), r.count() as u64))
        .collect()
}

/// Header text for the selected range ("2018-01-01 → 2018-01-31 (31 days)")
pub fn range_label(range: Option<DateRange>) -> String {
    match range {
        Some(r) if r.days() == 1 => format!("{} (1 day)", r),
        Some(r) => format!("{} ({} days)", r, r.days()),
        None => "no approved orders".to_string(),
    }
}

/// First three letters of a month label, year kept ("Jan", "Jan 2018")
pub fn short_month(label: &str) -> String {
    match label.split_once(' ') {
        Some((month, year)) => format!("{} {}", month.chars().take(3).collect::<String>(), year),
        None => label.chars().take(3).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator_core::StateCustomerCount;
    use chrono::NaiveDate;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(99441), "99,441");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_daily_points_offset_from_first_day() {
        let rows = vec![
            DailyOrderCount {
                day: NaiveDate::from_ymd_opt(2018, 1, 30).unwrap(),
                order_count: 4,
            },
            DailyOrderCount {
                day: NaiveDate::from_ymd_opt(2018, 2, 2).unwrap(),
                order_count: 7,
            },
        ];
        assert_eq!(daily_points(&rows), vec![(0.0, 4.0), (3.0, 7.0)]);
        assert!(daily_points(&[]).is_empty());
    }

    #[test]
    fn test_axis_bounds_never_degenerate() {
        assert_eq!(axis_bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(axis_bounds([2.0, 9.0, 4.0].into_iter()), [0.0, 9.0]);
    }

    #[test]
    fn test_ranked_bars() {
        let rows = vec![
            StateCustomerCount {
                state: "RJ".to_string(),
                customer_count: 3,
            },
            StateCustomerCount {
                state: "SP".to_string(),
                customer_count: 8,
            },
        ];
        assert_eq!(
            ranked_bars(&rows, 1),
            vec![("SP".to_string(), 8)]
        );
    }

    #[test]
    fn test_range_label_counts_days() {
        let day = |d| NaiveDate::from_ymd_opt(2018, 1, d).unwrap();
        let range = DateRange::new(day(1), day(31)).unwrap();
        assert_eq!(range_label(Some(range)), "2018-01-01 → 2018-01-31 (31 days)");
        let single = DateRange::new(day(5), day(5)).unwrap();
        assert_eq!(range_label(Some(single)), "2018-01-05 → 2018-01-05 (1 day)");
        assert_eq!(range_label(None), "no approved orders");
    }

    #[test]
    fn test_short_month() {
        assert_eq!(short_month("January"), "Jan");
        assert_eq!(short_month("September 2017"), "Sep 2017");
    }
}
