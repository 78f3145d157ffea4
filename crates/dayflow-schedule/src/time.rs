//! Wall-clock time-of-day in `HH:MM` form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing an `HH:MM` time string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("expected HH:MM, got {0:?}")]
    Format(String),

    #[error("hour out of range: {0}")]
    Hour(u32),

    #[error("minute out of range: {0}")]
    Minute(u32),
}

/// A wall-clock time of day with minute resolution.
///
/// Stored as minutes from midnight, which makes the schedule ordering a plain
/// integer compare and keeps layout math in whole minutes. Crosses the wire
/// as a 24-hour `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Create a time from hour and minute components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour > 23 {
            return Err(TimeParseError::Hour(hour));
        }
        if minute > 59 {
            return Err(TimeParseError::Minute(minute));
        }
        Ok(Self {
            minutes: (hour * 60 + minute) as u16,
        })
    }

    /// Minutes since midnight (0..=1439).
    pub fn minute_of_day(self) -> u16 {
        self.minutes
    }

    pub fn hour(self) -> u32 {
        u32::from(self.minutes / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minutes % 60)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| TimeParseError::Format(s.to_string()))?;

        // 1- or 2-digit hour, exactly 2-digit minute, digits only.
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(TimeParseError::Format(s.to_string()));
        }
        let hour: u32 = hour
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;

        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}
