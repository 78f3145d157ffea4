//! Chronological log view: every event, newest first.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use dayflow_schedule::{ClockTime, Event};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub kind_label: &'static str,
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
}

/// The "All Events (N)" page: cancelled events included, ordered by
/// creation time descending with id as the deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLog {
    pub total: usize,
    pub entries: Vec<LogEntry>,
}

pub fn event_log(events: &[Event]) -> EventLog {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let entries: Vec<LogEntry> = ordered
        .into_iter()
        .map(|event| LogEntry {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            kind_label: event.kind.label(),
            cancelled: event.cancelled,
            created_at: event.created_at,
        })
        .collect();

    EventLog {
        total: entries.len(),
        entries,
    }
}
