//! Scheduling core for Dayflow.
//!
//! Provides the event model, day bucketing, and overlap layout.

pub mod event;
pub mod index;
pub mod layout;
pub mod time;

pub use event::{Event, EventDraft, EventKind, EventPatch};
pub use index::{bucket_by_day, DateRange, WeekStart};
pub use layout::{layout, LayoutScale, Placement};
pub use time::{ClockTime, TimeParseError};
