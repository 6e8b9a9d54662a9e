//! Summary reports derived from the store.
//!
//! Used by the dashboard tables and the Excel export. Everything here is a pure
//! read over `AttendanceStore::query_range` and the raw collections.

use chrono::NaiveDate;

use crate::calendar::{month_bounds, month_name, year_bounds};
use crate::models::{DayCounts, DayType};
use crate::store::{AttendanceStore, SnapshotStorage};

/// Per-employee counts over one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub employee_id: String,
    pub employee_name: String,
    pub counts: DayCounts,
}

/// Per-employee counts for one month of a year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRow {
    pub month: u32,
    pub month_name: &'static str,
    pub employee_name: String,
    pub counts: DayCounts,
}

/// One entry, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date: NaiveDate,
    pub employee_name: String,
    pub day_type: DayType,
}

/// One row per employee, in display order, counting `[start, end]`.
pub fn summary<S: SnapshotStorage>(store: &AttendanceStore<S>, start: NaiveDate, end: NaiveDate) -> Vec<SummaryRow> {
    store
        .employees()
        .iter()
        .map(|emp| SummaryRow {
            employee_id: emp.id.clone(),
            employee_name: emp.display_name(),
            counts: store.query_range(&emp.id, start, end),
        })
        .collect()
}

/// Summary for one calendar month. Empty for an invalid month.
pub fn monthly_summary<S: SnapshotStorage>(store: &AttendanceStore<S>, year: i32, month: u32) -> Vec<SummaryRow> {
    match month_bounds(year, month) {
        Some((start, end)) => summary(store, start, end),
        None => Vec::new(),
    }
}

/// Summary for one calendar year.
pub fn yearly_summary<S: SnapshotStorage>(store: &AttendanceStore<S>, year: i32) -> Vec<SummaryRow> {
    match year_bounds(year) {
        Some((start, end)) => summary(store, start, end),
        None => Vec::new(),
    }
}

/// Twelve months times every employee, month-major.
pub fn monthly_breakdown<S: SnapshotStorage>(store: &AttendanceStore<S>, year: i32) -> Vec<MonthRow> {
    (1..=12)
        .flat_map(|month| {
            monthly_summary(store, year, month)
                .into_iter()
                .map(move |row| MonthRow {
                    month,
                    month_name: month_name(month),
                    employee_name: row.employee_name,
                    counts: row.counts,
                })
        })
        .collect()
}

/// Every entry dated in `year`, sorted by date.
///
/// Rows on the same date keep employee display order.
pub fn raw_rows<S: SnapshotStorage>(store: &AttendanceStore<S>, year: i32) -> Vec<RawRow> {
    let Some((start, end)) = year_bounds(year) else {
        return Vec::new();
    };

    let mut rows: Vec<(usize, RawRow)> = store
        .entries()
        .filter(|entry| entry.date >= start && entry.date <= end)
        .map(|entry| {
            let position = store.employees().iter().position(|e| e.id == entry.employee_id);
            let employee_name = position
                .map(|i| store.employees()[i].display_name())
                .unwrap_or_else(|| "Unknown".to_string());
            (
                position.unwrap_or(usize::MAX),
                RawRow {
                    date: entry.date,
                    employee_name,
                    day_type: entry.day_type,
                },
            )
        })
        .collect();

    rows.sort_by(|(a_pos, a), (b_pos, b)| a.date.cmp(&b.date).then(a_pos.cmp(b_pos)));
    rows.into_iter().map(|(_, row)| row).collect()
}
