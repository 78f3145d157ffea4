//! Temporal indexer: buckets events by calendar day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::event::Event;

/// Which weekday starts a week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// How many days `weekday` sits after the start of its week.
    fn offset_into_week(self, weekday: Weekday) -> u64 {
        let days = match self {
            Self::Monday => weekday.num_days_from_monday(),
            Self::Sunday => weekday.num_days_from_sunday(),
        };
        u64::from(days)
    }
}

/// An inclusive range of calendar days bounding which buckets a query
/// materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// A single day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The 7-day week containing `day` for the given week start.
    pub fn week_of(day: NaiveDate, week_start: WeekStart) -> Self {
        let back = week_start.offset_into_week(day.weekday());
        let start = day - Days::new(back);
        Self {
            start,
            end: start + Days::new(6),
        }
    }

    /// The 7x6 month grid for (year, month), including leading and trailing
    /// days from adjacent months. Returns `None` for an invalid month.
    pub fn month_grid(year: i32, month: u32, week_start: WeekStart) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let back = week_start.offset_into_week(first.weekday());
        let start = first - Days::new(back);
        Some(Self {
            start,
            end: start + Days::new(41),
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Days in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Bucket events by calendar day over `range`.
///
/// Every day inside the range gets an entry, empty or not. Within a bucket
/// events are sorted by [`Event::schedule_cmp`]. Pure: same inputs always
/// yield the same map.
pub fn bucket_by_day(events: &[Event], range: &DateRange) -> BTreeMap<NaiveDate, Vec<Event>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Event>> =
        range.days().map(|day| (day, Vec::new())).collect();

    for event in events {
        if let Some(bucket) = buckets.get_mut(&event.date) {
            bucket.push(event.clone());
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| a.schedule_cmp(b));
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn event_on(id: &str, date: NaiveDate, start: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date,
            start_time: start.parse().unwrap(),
            end_time: "23:00".parse().unwrap(),
            kind: EventKind::Internal,
            description: None,
            location: None,
            cancelled: false,
            created_at: "2024-04-01T00:00:00Z".parse().unwrap(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_of_monday_start() {
        // 2024-05-01 is a Wednesday
        let range = DateRange::week_of(day(2024, 5, 1), WeekStart::Monday);
        assert_eq!(range.start(), day(2024, 4, 29));
        assert_eq!(range.end(), day(2024, 5, 5));
        assert_eq!(range.days().count(), 7);
    }

    #[test]
    fn test_week_of_sunday_start() {
        let range = DateRange::week_of(day(2024, 5, 1), WeekStart::Sunday);
        assert_eq!(range.start(), day(2024, 4, 28));
        assert_eq!(range.end(), day(2024, 5, 4));
    }

    #[test]
    fn test_month_grid_is_42_days() {
        let range = DateRange::month_grid(2024, 5, WeekStart::Monday).unwrap();
        // May 2024 starts on a Wednesday; the grid leads with Apr 29.
        assert_eq!(range.start(), day(2024, 4, 29));
        assert_eq!(range.days().count(), 42);
        assert!(range.contains(day(2024, 5, 31)));
    }

    #[test]
    fn test_month_grid_invalid_month() {
        assert!(DateRange::month_grid(2024, 13, WeekStart::Monday).is_none());
    }

    #[test]
    fn test_empty_days_still_materialized() {
        let range = DateRange::week_of(day(2024, 5, 1), WeekStart::Monday);
        let events = vec![
            event_on("a", day(2024, 5, 1), "09:00"),
            event_on("b", day(2024, 5, 3), "10:00"),
        ];

        let buckets = bucket_by_day(&events, &range);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[&day(2024, 5, 1)].len(), 1);
        assert_eq!(buckets[&day(2024, 5, 3)].len(), 1);
        let empty = buckets.values().filter(|b| b.is_empty()).count();
        assert_eq!(empty, 5);
    }

    #[test]
    fn test_events_outside_range_excluded() {
        let range = DateRange::single_day(day(2024, 5, 1));
        let events = vec![
            event_on("in", day(2024, 5, 1), "09:00"),
            event_on("out", day(2024, 5, 2), "09:00"),
        ];

        let buckets = bucket_by_day(&events, &range);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&day(2024, 5, 1)].len(), 1);
        assert_eq!(buckets[&day(2024, 5, 1)][0].id, "in");
    }

    #[test]
    fn test_each_event_in_exactly_one_bucket() {
        let range = DateRange::month_grid(2024, 5, WeekStart::Monday).unwrap();
        let events: Vec<Event> = (0..20)
            .map(|i| event_on(&format!("e{i}"), day(2024, 5, 1 + (i % 28)), "08:00"))
            .collect();

        let buckets = bucket_by_day(&events, &range);
        let placed: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(placed, events.len());
        for (bucket_day, bucket) in &buckets {
            for event in bucket {
                assert_eq!(event.date, *bucket_day);
            }
        }
    }

    #[test]
    fn test_bucket_order_is_start_then_id() {
        let range = DateRange::single_day(day(2024, 5, 1));
        let events = vec![
            event_on("b", day(2024, 5, 1), "10:00"),
            event_on("c", day(2024, 5, 1), "09:00"),
            event_on("a", day(2024, 5, 1), "09:00"),
        ];

        let buckets = bucket_by_day(&events, &range);
        let ids: Vec<&str> = buckets[&day(2024, 5, 1)]
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_bucketing_is_pure() {
        let range = DateRange::week_of(day(2024, 5, 1), WeekStart::Monday);
        let events = vec![
            event_on("a", day(2024, 5, 1), "09:00"),
            event_on("b", day(2024, 5, 2), "10:00"),
        ];

        let first = bucket_by_day(&events, &range);
        let second = bucket_by_day(&events, &range);
        assert_eq!(first, second);
    }
}
