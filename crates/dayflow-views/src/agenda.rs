//! Single-day agenda view.

use chrono::NaiveDate;
use serde::Serialize;

use dayflow_schedule::{bucket_by_day, ClockTime, DateRange, Event};

/// One agenda row, in schedule order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaEntry {
    pub id: String,
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub kind_label: &'static str,
    pub accent: &'static str,
    pub location: Option<String>,
    pub description: Option<String>,
    pub cancelled: bool,
}

/// Render model for one day. The headline count is the active
/// (non-cancelled) total, the "N events scheduled" figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub active_count: usize,
    pub entries: Vec<AgendaEntry>,
}

pub fn day_agenda(events: &[Event], date: NaiveDate) -> DayAgenda {
    let range = DateRange::single_day(date);
    let mut buckets = bucket_by_day(events, &range);
    let day_events = buckets.remove(&date).unwrap_or_default();

    let active_count = day_events.iter().filter(|e| !e.cancelled).count();
    let entries = day_events
        .into_iter()
        .map(|event| AgendaEntry {
            id: event.id,
            title: event.title,
            start_time: event.start_time,
            end_time: event.end_time,
            kind_label: event.kind.label(),
            accent: event.kind.accent(),
            location: event.location,
            description: event.description,
            cancelled: event.cancelled,
        })
        .collect();

    DayAgenda {
        date,
        active_count,
        entries,
    }
}
