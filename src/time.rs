use crate::error::GridError;
use core::fmt;
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Width of a single slot in the weekly grid
pub const SLOT_MINUTES: u16 = 30;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minute of the day, `00:00` through `24:00` inclusive.
/// `24:00` only makes sense as the *end* of a slot or interval.
///
/// Times are parsed once at the boundary and compared numerically from then
/// on. They always format back zero-padded.
///
/// # Examples
/// ```
/// use moim_libs::time::TimeOfDay;
///
/// let time: TimeOfDay = "09:30".parse().unwrap();
///
/// assert_eq!(time.minutes(), 570);
/// assert_eq!(time.hour(), 9);
/// assert_eq!(time.to_string(), "09:30");
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub(crate) const fn new(minutes: u16) -> TimeOfDay {
        TimeOfDay(minutes)
    }

    /// Construct from minutes since midnight
    ///
    /// # Examples
    /// ```
    /// use moim_libs::time::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_minutes(600).unwrap().to_string(), "10:00");
    /// assert!(TimeOfDay::from_minutes(1441).is_err());
    /// ```
    pub fn from_minutes(minutes: u16) -> Result<TimeOfDay, GridError> {
        if minutes > MINUTES_PER_DAY {
            Err(GridError::InvalidTimeFormat(format!("{} minutes", minutes)))
        } else {
            Ok(TimeOfDay(minutes))
        }
    }

    pub fn from_hm(hour: u8, minute: u8) -> Result<TimeOfDay, GridError> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute > 0) {
            Err(GridError::InvalidTimeFormat(format!("{}:{}", hour, minute)))
        } else {
            Ok(TimeOfDay(u16::from(hour) * 60 + u16::from(minute)))
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        // At most 24, always fits
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Whether this time sits on a 30 minute slot boundary
    pub fn is_slot_aligned(self) -> bool {
        Integer::is_multiple_of(&self.0, &SLOT_MINUTES)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute) = self.0.div_rem(&60);
        write!(f, "{:02}:{:02}", hour, minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = GridError;

    /// Only the strict zero-padded 24-hour form is accepted. Anything looser
    /// would break ordering for callers that still compare the strings.
    ///
    /// # Examples
    /// ```
    /// use moim_libs::time::TimeOfDay;
    ///
    /// assert!("24:00".parse::<TimeOfDay>().is_ok());
    /// assert!("9:00".parse::<TimeOfDay>().is_err());
    /// assert!("24:30".parse::<TimeOfDay>().is_err());
    /// assert!("12:60".parse::<TimeOfDay>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(GridError::InvalidTimeFormat(s.to_string()));
        }

        let two_digits = |pair: &[u8]| -> Option<u8> {
            pair.iter().try_fold(0u8, |acc, &b| {
                if b.is_ascii_digit() {
                    Some(acc * 10 + (b - b'0'))
                } else {
                    None
                }
            })
        };

        match (two_digits(&bytes[..2]), two_digits(&bytes[3..])) {
            (Some(hour), Some(minute)) => TimeOfDay::from_hm(hour, minute)
                .map_err(|_| GridError::InvalidTimeFormat(s.to_string())),
            _ => Err(GridError::InvalidTimeFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for TimeOfDay {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(TimeOfDay(u.int_in_range(0..=MINUTES_PER_DAY)?))
    }
}

/// Half-open [start, end) range within a single day
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> TimeRange {
        TimeRange { start, end }
    }

    /// # Examples
    /// ```
    /// use moim_libs::time::{TimeOfDay, TimeRange};
    ///
    /// let range = TimeRange::new("10:00".parse().unwrap(), "11:00".parse().unwrap());
    ///
    /// assert!(range.contains("10:00".parse().unwrap()));
    /// assert!(range.contains("10:30".parse().unwrap()));
    /// assert!(!range.contains("11:00".parse().unwrap()));
    /// ```
    pub fn contains(self, time: TimeOfDay) -> bool {
        time >= self.start && time < self.end
    }

    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    pub fn duration_minutes(self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}

pub trait TimeMerge {
    fn time_merge(self) -> Vec<TimeRange>;
}

impl<'a, T> TimeMerge for T
where
    T: Iterator<Item = &'a TimeRange>,
{
    /// Combines overlapping and touching `TimeRange`s together.
    /// Expects the ranges sorted by start. Empty ranges are dropped since they
    /// cover nothing.
    ///
    /// # Examples
    /// ```
    /// use moim_libs::time::{TimeMerge, TimeOfDay, TimeRange};
    ///
    /// let range = |start: &str, end: &str| {
    ///     TimeRange::new(start.parse().unwrap(), end.parse().unwrap())
    /// };
    ///
    /// let ranges = vec![
    ///     range("09:00", "10:00"),
    ///     range("09:30", "10:30"),
    ///     range("10:30", "11:00"),
    ///     range("13:00", "13:00"),
    ///     range("14:00", "15:00"),
    /// ];
    ///
    /// assert_eq!(
    ///     ranges.iter().time_merge(),
    ///     vec![range("09:00", "11:00"), range("14:00", "15:00")]
    /// );
    /// ```
    fn time_merge(self) -> Vec<TimeRange> {
        let size_hint = self.size_hint().1.unwrap_or(0);
        let (last, mut acc) = self.filter(|range| !range.is_empty()).fold(
            (None, Vec::with_capacity(size_hint)),
            |(last, mut acc): (Option<TimeRange>, Vec<TimeRange>), &curr| match last {
                None => (Some(curr), acc),
                Some(range) if curr.start <= range.end => (
                    Some(TimeRange::new(range.start, range.end.max(curr.end))),
                    acc,
                ),
                Some(range) => {
                    acc.push(range);
                    (Some(curr), acc)
                }
            },
        );

        if let Some(range) = last {
            acc.push(range);
        }

        acc
    }
}
