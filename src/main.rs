use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};

use dayflow_schedule::{EventDraft, EventKind};
use dayflow_sync::{EventPlanner, EventStore, MemoryEventStore};
use dayflow_views::{day_agenda, day_timeline, event_log, month_grid};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    dayflow_core::init()?;

    let (config, _validation) = dayflow_core::Config::load_validated()?;
    tracing::info!("Dayflow started");

    // Demo runs against the in-process store, seeded with a sample day.
    let store = MemoryEventStore::new();
    let planner = Arc::new(EventPlanner::new(EventStore::memory(store)));

    let today = Local::now().date_naive();
    for draft in sample_drafts(today) {
        planner.create(&draft).await?;
    }
    planner.refresh().await?;

    if config.sync.refresh_minutes > 0 {
        let every = std::time::Duration::from_secs(u64::from(config.sync.refresh_minutes) * 60);
        planner.spawn_refresher(every);
    }

    let events = planner.snapshot();
    println!("Dayflow - Event Scheduling & Multi-View Layout");
    println!(
        "{} events cached, {} active\n",
        events.len(),
        planner.active_count()
    );

    if let Some(grid) = month_grid(
        &events,
        today.year(),
        today.month(),
        config.calendar.week_start,
        today,
    ) {
        println!("Month grid {:04}-{:02}:", grid.year, grid.month);
        for week in &grid.weeks {
            let row: Vec<String> = week
                .iter()
                .map(|cell| {
                    let busy = cell.internal_active + cell.external_active;
                    let day = format!("{:>2}", cell.date.day());
                    if busy > 0 {
                        format!("{day}({busy})")
                    } else {
                        day
                    }
                })
                .collect();
            println!("  {}", row.join("  "));
        }
    }

    let agenda = day_agenda(&events, today);
    println!(
        "\nAgenda for {}: {} events scheduled",
        agenda.date, agenda.active_count
    );
    for entry in &agenda.entries {
        let state = if entry.cancelled { " [cancelled]" } else { "" };
        println!(
            "  {}-{}  {} ({}){}",
            entry.start_time, entry.end_time, entry.title, entry.kind_label, state
        );
    }

    let timeline = day_timeline(&events, today, &config.layout.scale());
    println!("\nTimeline placements:");
    for entry in &timeline.entries {
        println!(
            "  {:<20} y={:>6.1} h={:>5.1} x={:.2} w={:.2}",
            entry.title,
            entry.vertical_start,
            entry.vertical_extent,
            entry.left_fraction,
            entry.width_fraction
        );
    }

    let log = event_log(&events);
    println!("\nAll Events ({}):", log.total);
    for entry in &log.entries {
        println!("  {}  {}  {}", entry.created_at, entry.id, entry.title);
    }

    Ok(())
}

fn sample_drafts(today: NaiveDate) -> Vec<EventDraft> {
    let draft = |title: &str, date, start: &str, end: &str, kind, location: Option<&str>| {
        EventDraft {
            title: title.to_string(),
            date,
            start_time: start.parse().expect("literal time"),
            end_time: end.parse().expect("literal time"),
            kind,
            description: None,
            location: location.map(str::to_string),
        }
    };

    vec![
        draft(
            "Design Review",
            today,
            "10:00",
            "11:30",
            EventKind::Internal,
            Some("Conference Room A"),
        ),
        draft(
            "Lunch with Sarah",
            today,
            "12:30",
            "13:30",
            EventKind::External,
            Some("The Green Bowl"),
        ),
        draft(
            "Sync overlap",
            today,
            "10:30",
            "11:00",
            EventKind::Internal,
            None,
        ),
        draft(
            "Project Kickoff",
            today + chrono::Days::new(2),
            "14:00",
            "15:00",
            EventKind::Internal,
            None,
        ),
    ]
}
