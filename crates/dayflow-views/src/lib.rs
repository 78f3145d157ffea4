//! View adapters for Dayflow.
//!
//! Pure functions from the event set to render models. All lifecycle and
//! layout decisions come from `dayflow-schedule`; nothing here re-derives
//! them.

pub mod agenda;
pub mod log;
pub mod month;
pub mod timeline;

pub use agenda::{day_agenda, AgendaEntry, DayAgenda};
pub use log::{event_log, EventLog, LogEntry};
pub use month::{month_grid, MonthCell, MonthGrid};
pub use timeline::{day_timeline, DayTimeline, HourMark, TimelineEntry};
