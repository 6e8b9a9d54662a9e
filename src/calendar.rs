//! Calendar arithmetic for the month grid, navigation and report ranges.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Column headers for a Monday-first week.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// First and last day of a month, or `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((start, end))
}

/// January 1st and December 31st of a year.
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift by whole months, clamping to the end of shorter months.
///
/// Saturates at the edge of the representable range.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

pub fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

/// Every day shown for the month of `date`.
///
/// Runs from the Monday on or before the 1st to the Sunday on or after the last
/// day, so the length is always a multiple of seven.
pub fn month_grid(date: NaiveDate) -> Vec<NaiveDate> {
    let first = start_of_month(date);
    let last = add_months(first, 1).pred_opt().unwrap_or(first);

    let grid_start = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    let grid_end = last + Duration::days(6 - last.weekday().num_days_from_monday() as i64);

    grid_start.iter_days().take_while(|d| *d <= grid_end).collect()
}

/// English month name for 1..=12.
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}
