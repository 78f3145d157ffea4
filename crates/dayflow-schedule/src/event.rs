//! Event model and wire types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::time::ClockTime;

/// Closed set of event categories. A presentation tag only; carries no
/// scheduling semantics.
///
/// The wire strings are fixed by the persistence schema. Any other string is
/// a decode error, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "interno")]
    Internal,

    #[serde(rename = "externo")]
    External,
}

impl EventKind {
    /// Display label for views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Internal => "Interno",
            Self::External => "Externo",
        }
    }

    /// Accent color tag for views. Keyed here once so no view invents its
    /// own mapping.
    pub fn accent(self) -> &'static str {
        match self {
            Self::Internal => "blue",
            Self::External => "green",
        }
    }
}

/// A scheduled event as held in the local cache.
///
/// Identity (`id`) and `created_at` are assigned by the remote store and
/// never change; `cancelled` is the only lifecycle flag. A cancelled event
/// stays in the set until explicitly deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Total ordering used within a day bucket: start time ascending, ties
    /// broken by id for determinism.
    pub fn schedule_cmp(&self, other: &Event) -> Ordering {
        self.start_time
            .cmp(&other.start_time)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// An event payload prior to server-assigned `id`/`createdAt`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Partial field set for a PATCH mutation. Unset fields are omitted from
/// the request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_date::serialize_opt"
    )]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<ClockTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<ClockTime>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
}

impl EventPatch {
    /// The cancellation patch: `{"cancelled": true}`.
    pub fn cancel() -> Self {
        Self {
            cancelled: Some(true),
            ..Self::default()
        }
    }
}

/// The `date` field crosses the wire as an ISO-8601 date-time string with
/// the time-of-day component ignored. Both sides operate in the same local
/// zone, so the calendar day is read off the string without conversion.
mod wire_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")))
    }

    pub fn serialize_opt<S: Serializer>(
        date: &Option<NaiveDate>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serialize(d, ser),
            // skip_serializing_if keeps None out of the body
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(de)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s:?}")))
    }

    fn parse(s: &str) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }
}
