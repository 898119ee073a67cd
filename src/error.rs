use crate::time::TimeOfDay;
#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum GridError {
    #[error("Invalid time format. Expected zero-padded \"HH:MM\", got {0:?}")]
    InvalidTimeFormat(String),
    #[error("{0} is not on a 30 minute slot boundary")]
    OffGrid(TimeOfDay),
    #[error("Blocked interval must end after it starts, got {start}~{end}")]
    EmptyInterval { start: TimeOfDay, end: TimeOfDay },
    #[error("Day of week must be within 0..=6, got {0}")]
    InvalidDayOfWeek(u8),
    #[error("Display window [{start_hour}, {end_hour}) must satisfy start < end <= 24")]
    InvalidDisplayWindow { start_hour: u8, end_hour: u8 },
}
