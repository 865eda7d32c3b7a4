use {
    crate::{
        aggregator_core::{DateRange, MonthGrouping, RangeError, SummaryTables, TransactionTable},
        config::DashboardConfig,
    },
};

/// User interaction that changes what the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    /// Move the range start by N days
    ShiftStart(i64),
    /// Move the range end by N days
    ShiftEnd(i64),
    /// Back to the full approval range of the table
    ResetRange,
    ToggleGrouping,
}

/// Everything one render pass needs
///
/// The loaded table never changes; the range and grouping are the only
/// inputs a user can move. Each change rebuilds `summaries` from scratch.
pub struct DashboardState {
    table: TransactionTable,
    /// Full approval range of the table, widened to cover the initial range
    bounds: Option<DateRange>,
    range: Option<DateRange>,
    grouping: MonthGrouping,
    top_n: usize,
    summaries: SummaryTables,
}

impl DashboardState {
    pub fn new(table: TransactionTable, config: &DashboardConfig) -> Result<Self, RangeError> {
        let table_bounds = table.approval_bounds();
        let range = initial_range(table_bounds, config.start_date, config.end_date)?;
        let bounds = match (table_bounds, range) {
            (Some(b), Some(r)) => Some(b.span(&r)),
            (b, r) => b.or(r),
        };

        let summaries = SummaryTables::for_range(&table, range.as_ref(), config.grouping);
        log::info!(
            "📊 Initial range: {} ({} orders)",
            range.map(|r| r.to_string()).unwrap_or_else(|| "none".to_string()),
            summaries.total_orders()
        );

        Ok(Self {
            table,
            bounds,
            range,
            grouping: config.grouping,
            top_n: config.top_n,
            summaries,
        })
    }

    /// Apply an action; returns true when the summaries were recomputed
    pub fn apply(&mut self, action: DashboardAction) -> bool {
        let (range, grouping) = match (action, self.range, self.bounds) {
            (DashboardAction::ShiftStart(d), Some(r), Some(b)) => (Some(r.shift_start(d, &b)), self.grouping),
            (DashboardAction::ShiftEnd(d), Some(r), Some(b)) => (Some(r.shift_end(d, &b)), self.grouping),
            (DashboardAction::ResetRange, _, _) => (self.table.approval_bounds().or(self.range), self.grouping),
            (DashboardAction::ToggleGrouping, _, _) => (self.range, self.grouping.toggled()),
            _ => return false,
        };

        if range == self.range && grouping == self.grouping {
            return false;
        }

        self.range = range;
        self.grouping = grouping;
        self.summaries = SummaryTables::for_range(&self.table, self.range.as_ref(), self.grouping);
        log::debug!("Recomputed summaries after {:?}", action);
        true
    }

    pub fn summaries(&self) -> &SummaryTables {
        &self.summaries
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn grouping(&self) -> MonthGrouping {
        self.grouping
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rows in the loaded (unfiltered) table
    pub fn total_rows(&self) -> usize {
        self.table.len()
    }
}

/// Configured dates override the table bounds one side at a time
pub fn initial_range(
    bounds: Option<DateRange>,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> Result<Option<DateRange>, RangeError> {
    let start = start.or(bounds.map(|b| b.start()));
    let end = end.or(bounds.map(|b| b.end()));
    match (start, end) {
        (Some(s), Some(e)) => DateRange::new(s, e).map(Some),
        _ => Ok(None),
    }
}
