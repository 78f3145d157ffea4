//! Month grid view: 7x6 cells with per-kind counts.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use dayflow_schedule::{bucket_by_day, DateRange, Event, EventKind, WeekStart};

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    pub internal_active: usize,
    pub external_active: usize,
    pub cancelled: usize,
}

/// Render model for the month view. Weeks are rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<MonthCell>>,
}

/// Build the month grid for (year, month). Returns `None` for an invalid
/// month.
pub fn month_grid(
    events: &[Event],
    year: i32,
    month: u32,
    week_start: WeekStart,
    today: NaiveDate,
) -> Option<MonthGrid> {
    let range = DateRange::month_grid(year, month, week_start)?;
    let buckets = bucket_by_day(events, &range);

    let cells: Vec<MonthCell> = buckets
        .iter()
        .map(|(&date, bucket)| {
            let active = |kind: EventKind| {
                bucket
                    .iter()
                    .filter(|e| !e.cancelled && e.kind == kind)
                    .count()
            };
            MonthCell {
                date,
                in_month: date.year() == year && date.month() == month,
                is_today: date == today,
                internal_active: active(EventKind::Internal),
                external_active: active(EventKind::External),
                cancelled: bucket.iter().filter(|e| e.cancelled).count(),
            }
        })
        .collect();

    let weeks = cells.chunks(7).map(<[MonthCell]>::to_vec).collect();

    Some(MonthGrid { year, month, weeks })
}
