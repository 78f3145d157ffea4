//! Minute-resolution timeline view for one day.

use chrono::NaiveDate;
use serde::Serialize;

use dayflow_schedule::{bucket_by_day, layout, DateRange, Event, LayoutScale};

/// Tick on the hour axis, positioned on the same scale as the entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMark {
    pub hour: u32,
    pub offset: f32,
}

/// One positioned event. Lane geometry is exposed as fractions of the day
/// column width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub id: String,
    pub title: String,
    pub accent: &'static str,
    pub cancelled: bool,
    pub vertical_start: f32,
    pub vertical_extent: f32,
    pub left_fraction: f32,
    pub width_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTimeline {
    pub date: NaiveDate,
    pub hour_marks: Vec<HourMark>,
    pub entries: Vec<TimelineEntry>,
}

pub fn day_timeline(events: &[Event], date: NaiveDate, scale: &LayoutScale) -> DayTimeline {
    let range = DateRange::single_day(date);
    let mut buckets = bucket_by_day(events, &range);
    let day_events = buckets.remove(&date).unwrap_or_default();

    let entries = layout(&day_events, scale)
        .into_iter()
        .map(|placement| {
            let width = 1.0 / placement.lane_count.max(1) as f32;
            TimelineEntry {
                id: placement.event.id,
                title: placement.event.title,
                accent: placement.event.kind.accent(),
                cancelled: placement.event.cancelled,
                vertical_start: placement.vertical_start,
                vertical_extent: placement.vertical_extent,
                left_fraction: placement.lane as f32 * width,
                width_fraction: width,
            }
        })
        .collect();

    let hour_marks = (0..24)
        .map(|hour| HourMark {
            hour,
            offset: (hour * 60) as f32 * scale.units_per_minute,
        })
        .collect();

    DayTimeline {
        date,
        hour_marks,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use dayflow_schedule::EventKind;

    fn event(id: &str, start: &str, end: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            kind: EventKind::Internal,
            description: None,
            location: None,
            cancelled: false,
            created_at: "2024-04-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        }
    }

    fn find<'a>(timeline: &'a DayTimeline, id: &str) -> &'a TimelineEntry {
        timeline.entries.iter().find(|e| e.id == id).unwrap()
    }

    #[test]
    fn test_cluster_splits_width() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let events = vec![
            event("a", "09:00", "10:00"),
            event("b", "09:30", "10:30"),
            event("c", "11:00", "12:00"),
        ];

        let timeline = day_timeline(&events, date, &LayoutScale::default());

        let a = find(&timeline, "a");
        let b = find(&timeline, "b");
        let c = find(&timeline, "c");
        assert_eq!((a.left_fraction, a.width_fraction), (0.0, 0.5));
        assert_eq!((b.left_fraction, b.width_fraction), (0.5, 0.5));
        assert_eq!((c.left_fraction, c.width_fraction), (0.0, 1.0));
    }

    #[test]
    fn test_hour_axis_matches_scale() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let scale = LayoutScale {
            units_per_minute: 0.5,
            min_event_minutes: 15,
        };

        let timeline = day_timeline(&[], date, &scale);
        assert_eq!(timeline.hour_marks.len(), 24);
        assert_eq!(timeline.hour_marks[0].offset, 0.0);
        assert_eq!(timeline.hour_marks[9].offset, 9.0 * 60.0 * 0.5);
    }

    #[test]
    fn test_only_requested_day_appears() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut elsewhere = event("x", "09:00", "10:00");
        elsewhere.date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

        let timeline = day_timeline(&[elsewhere], date, &LayoutScale::default());
        assert!(timeline.entries.is_empty());
    }
}
