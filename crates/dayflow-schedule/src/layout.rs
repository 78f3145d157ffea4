//! Overlap layout engine: non-overlapping 2-D placement for one day's events.

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Linear minute-to-unit scale shared by every time-axis view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutScale {
    /// Vertical units per minute.
    pub units_per_minute: f32,

    /// Floor applied to an event's rendered duration. Degenerate intervals
    /// (`end <= start`) are stretched to this span so they still occupy a
    /// lane and render without error.
    pub min_event_minutes: u16,
}

impl Default for LayoutScale {
    fn default() -> Self {
        Self {
            units_per_minute: 1.0,
            min_event_minutes: 15,
        }
    }
}

/// Computed placement of one event on the day column.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub event: Event,
    /// Offset of the event's top edge, in scale units from midnight.
    pub vertical_start: f32,
    /// Rendered height in scale units, never zero.
    pub vertical_extent: f32,
    /// 0-based horizontal slot; no two overlapping events share a lane.
    pub lane: usize,
    /// Lanes in this event's overlap cluster, so cluster members render at
    /// equal fractional width.
    pub lane_count: usize,
}

/// Effective interval in minutes from midnight, with the minimum span
/// applied. End is clamped so it never runs past the day column.
fn span(event: &Event, min_minutes: u16) -> (u16, u16) {
    let start = event.start_time.minute_of_day();
    let floor = start.saturating_add(min_minutes.max(1));
    let end = event.end_time.minute_of_day().max(floor).min(24 * 60);
    (start, end)
}

/// Compute non-overlapping placement for one day's events.
///
/// Greedy interval-graph coloring: events are processed by start time (ties
/// by end ascending, then id) and each takes the lowest lane not held by a
/// still-open event. A cluster closes when no interval is open, at which
/// point every member learns the cluster's lane count. Deterministic and
/// pure: identical input always yields identical placement.
pub fn layout(day_events: &[Event], scale: &LayoutScale) -> Vec<Placement> {
    let min_minutes = scale.min_event_minutes;

    let mut order: Vec<usize> = (0..day_events.len()).collect();
    order.sort_by(|&a, &b| {
        let (start_a, end_a) = span(&day_events[a], min_minutes);
        let (start_b, end_b) = span(&day_events[b], min_minutes);
        start_a
            .cmp(&start_b)
            .then(end_a.cmp(&end_b))
            .then_with(|| day_events[a].id.cmp(&day_events[b].id))
    });

    let mut placements: Vec<Placement> = Vec::with_capacity(day_events.len());
    // Open intervals of the cluster currently being swept.
    let mut open: Vec<(u16, usize)> = Vec::new(); // (end, lane)
    let mut cluster_start = 0; // first placement index of the open cluster
    let mut cluster_lanes = 0;

    for &idx in &order {
        let event = &day_events[idx];
        let (start, end) = span(event, min_minutes);

        open.retain(|(open_end, _)| *open_end > start);
        if open.is_empty() && !placements.is_empty() {
            // Cluster closed; fix lane_count for its members.
            for placement in &mut placements[cluster_start..] {
                placement.lane_count = cluster_lanes;
            }
            cluster_start = placements.len();
            cluster_lanes = 0;
        }

        let mut lane = 0;
        while open.iter().any(|(_, open_lane)| *open_lane == lane) {
            lane += 1;
        }
        open.push((end, lane));
        cluster_lanes = cluster_lanes.max(lane + 1);

        placements.push(Placement {
            event: event.clone(),
            vertical_start: f32::from(start) * scale.units_per_minute,
            vertical_extent: f32::from(end - start) * scale.units_per_minute,
            lane,
            lane_count: 0,
        });
    }

    for placement in &mut placements[cluster_start..] {
        placement.lane_count = cluster_lanes;
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use chrono::NaiveDate;

    fn timed(id: &str, start: &str, end: &str) -> Event {
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
            created_at: "2024-04-01T00:00:00Z".parse().unwrap(),
        }
    }

    fn find<'a>(placements: &'a [Placement], id: &str) -> &'a Placement {
        placements.iter().find(|p| p.event.id == id).unwrap()
    }

    fn overlaps(a: &Placement, b: &Placement) -> bool {
        let scale = LayoutScale::default();
        let span = |p: &Placement| {
            let start = p.vertical_start / scale.units_per_minute;
            (start, start + p.vertical_extent / scale.units_per_minute)
        };
        let (start_a, end_a) = span(a);
        let (start_b, end_b) = span(b);
        start_a < end_b && start_b < end_a
    }

    #[test]
    fn test_overlapping_pair_and_disjoint_single() {
        let events = vec![
            timed("a", "09:00", "10:00"),
            timed("b", "09:30", "10:30"),
            timed("c", "11:00", "12:00"),
        ];

        let placements = layout(&events, &LayoutScale::default());

        let a = find(&placements, "a");
        let b = find(&placements, "b");
        let c = find(&placements, "c");
        assert_eq!((a.lane, a.lane_count), (0, 2));
        assert_eq!((b.lane, b.lane_count), (1, 2));
        assert_eq!((c.lane, c.lane_count), (0, 1));
    }

    #[test]
    fn test_vertical_geometry_follows_scale() {
        let events = vec![timed("a", "09:00", "10:00")];
        let scale = LayoutScale {
            units_per_minute: 2.0,
            min_event_minutes: 15,
        };

        let placements = layout(&events, &scale);
        assert_eq!(placements[0].vertical_start, 540.0 * 2.0);
        assert_eq!(placements[0].vertical_extent, 60.0 * 2.0);
    }

    #[test]
    fn test_degenerate_interval_gets_minimum_extent() {
        let events = vec![timed("a", "10:00", "10:00"), timed("b", "10:00", "09:00")];
        let scale = LayoutScale::default();

        let placements = layout(&events, &scale);
        for placement in &placements {
            assert_eq!(placement.vertical_extent, 15.0);
        }
        // Both occupy the same stretched interval, so they share a cluster.
        assert_eq!(find(&placements, "a").lane_count, 2);
    }

    #[test]
    fn test_lane_freed_after_interval_closes() {
        // b overlaps a; c starts after a ends and should reuse lane 0.
        let events = vec![
            timed("a", "09:00", "10:00"),
            timed("b", "09:30", "11:00"),
            timed("c", "10:15", "11:00"),
        ];

        let placements = layout(&events, &LayoutScale::default());
        assert_eq!(find(&placements, "a").lane, 0);
        assert_eq!(find(&placements, "b").lane, 1);
        assert_eq!(find(&placements, "c").lane, 0);
        // All three chain into one cluster of two lanes.
        for placement in &placements {
            assert_eq!(placement.lane_count, 2);
        }
    }

    #[test]
    fn test_same_lane_never_overlaps() {
        let events = vec![
            timed("a", "08:00", "12:00"),
            timed("b", "08:30", "09:30"),
            timed("c", "09:00", "10:00"),
            timed("d", "09:45", "11:00"),
            timed("e", "13:00", "13:00"),
            timed("f", "13:05", "14:00"),
        ];

        let placements = layout(&events, &LayoutScale::default());
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                if a.lane == b.lane {
                    assert!(
                        !overlaps(a, b),
                        "{} and {} share lane {} but overlap",
                        a.event.id,
                        b.event.id,
                        a.lane
                    );
                }
            }
        }
    }

    #[test]
    fn test_lane_minimality() {
        let events = vec![
            timed("a", "09:00", "10:00"),
            timed("b", "09:15", "09:45"),
            timed("c", "09:30", "10:30"),
            timed("d", "11:00", "12:00"),
        ];

        let placements = layout(&events, &LayoutScale::default());
        for placement in &placements {
            let concurrent = placements
                .iter()
                .filter(|other| overlaps(placement, other))
                .count(); // includes self
            assert!(
                placement.lane < concurrent,
                "{} took lane {} with only {} concurrent events",
                placement.event.id,
                placement.lane,
                concurrent
            );
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let events = vec![
            timed("a", "09:00", "10:00"),
            timed("b", "09:00", "10:00"),
            timed("c", "09:30", "11:00"),
        ];

        let first = layout(&events, &LayoutScale::default());
        let second = layout(&events, &LayoutScale::default());
        assert_eq!(first, second);
        // Equal intervals resolve by id, so "a" is placed before "b".
        assert_eq!(find(&first, "a").lane, 0);
        assert_eq!(find(&first, "b").lane, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(layout(&[], &LayoutScale::default()).is_empty());
    }

    #[test]
    fn test_late_event_clamped_to_day_end() {
        let events = vec![timed("a", "23:55", "23:55")];
        let placements = layout(&events, &LayoutScale::default());
        let top = placements[0].vertical_start;
        let bottom = top + placements[0].vertical_extent;
        assert!(bottom <= 24.0 * 60.0);
        assert!(placements[0].vertical_extent > 0.0);
    }
}
