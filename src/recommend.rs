use crate::aggregate::{DayAvailability, GroupAvailability, TimeSlot};
use crate::config::RecommendationConfig;
use crate::time::{TimeOfDay, SLOT_MINUTES};
use itertools::Itertools;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Index 0 is Sunday
pub const KOREAN_DAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];
pub const ENGLISH_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    Korean,
    English,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Korean
    }
}

impl Locale {
    pub fn day_name(self, day_of_week: u8) -> Option<&'static str> {
        let names = match self {
            Locale::Korean => &KOREAN_DAY_NAMES,
            Locale::English => &ENGLISH_DAY_NAMES,
        };
        names.get(usize::from(day_of_week)).copied()
    }

    /// # Examples
    /// ```
    /// use moim_libs::Locale;
    ///
    /// let (start, end) = ("10:00".parse().unwrap(), "24:00".parse().unwrap());
    ///
    /// assert_eq!(Locale::Korean.label(1, start, end), "월요일 10:00~24:00");
    /// assert_eq!(Locale::English.label(1, start, end), "Mon 10:00~24:00");
    /// ```
    pub fn label(self, day_of_week: u8, start: TimeOfDay, end: TimeOfDay) -> String {
        let day = self.day_name(day_of_week).unwrap_or("?");
        match self {
            Locale::Korean => format!("{}요일 {}~{}", day, start, end),
            Locale::English => format!("{} {}~{}", day, start, end),
        }
    }
}

/// A window where every member is free. Derived, never stored.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub label: String,
    pub duration_minutes: u32,
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// [`recommend_with`] using the default configuration: runs of at least an
/// hour, top 3, Korean labels.
pub fn recommend(group: &GroupAvailability) -> Vec<Recommendation> {
    recommend_with(group, &RecommendationConfig::default())
}

/// Finds the longest runs of consecutive slots where everyone is free.
///
/// Each day is scanned on its own, runs shorter than `min_run_slots` are
/// dropped, and the rest are ordered longest first. Ties keep the order they
/// were found in (day, then time of day).
///
/// A group with no members yields no recommendations. Literally every slot
/// is "0 of 0 free", which would recommend the whole week to nobody.
///
/// # Examples
/// ```
/// use moim_libs::{compute_default_availability, recommend, BlockedInterval, MemberSnapshot};
///
/// // Busy all week except Wednesday evening
/// let intervals = (0..7)
///     .map(|day| {
///         if day == 3 {
///             BlockedInterval::parse(day, "09:00", "19:00").unwrap()
///         } else {
///             BlockedInterval::parse(day, "00:00", "24:00").unwrap()
///         }
///     })
///     .collect();
/// let members = vec![MemberSnapshot::new("a", "Ana", intervals)];
///
/// let recommendations = recommend(&compute_default_availability(&members));
///
/// assert_eq!(recommendations.len(), 1);
/// assert_eq!(recommendations[0].label, "수요일 19:00~24:00");
/// assert_eq!(recommendations[0].duration_minutes, 300);
/// ```
pub fn recommend_with(group: &GroupAvailability, config: &RecommendationConfig) -> Vec<Recommendation> {
    if group.total_members == 0 {
        debug!("No members, skipping recommendations");
        return vec![];
    }

    let recommendations = group
        .availability
        .iter()
        .flat_map(|day| {
            full_availability_runs(&day.slots, group.total_members)
                .into_iter()
                .filter(move |run| run.len() >= config.min_run_slots)
                .map(move |run| to_recommendation(day, run, config))
        })
        // Stable, so ties stay in discovery order
        .sorted_by(|a, b| b.duration_minutes.cmp(&a.duration_minutes))
        .take(config.limit)
        .collect_vec();

    debug!("Found {} recommended windows", recommendations.len());

    recommendations
}

/// Maximal index ranges of consecutive slots where everyone is available.
/// The end of the sequence closes any open run.
fn full_availability_runs(slots: &[TimeSlot], total_members: usize) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start_index: Option<usize> = None;

    for (index, slot) in slots.iter().enumerate() {
        let is_full = slot.available_count == total_members;

        if is_full && start_index.is_none() {
            start_index = Some(index);
        }

        let is_end = !is_full || index == slots.len() - 1;
        if is_end {
            if let Some(start) = start_index.take() {
                let end = if is_full { index + 1 } else { index };
                runs.push(start..end);
            }
        }
    }

    runs
}

fn to_recommendation(day: &DayAvailability, run: Range<usize>, config: &RecommendationConfig) -> Recommendation {
    let start_time = day.slots[run.start].start_time;
    let end_time = day.slots[run.end - 1].end_time;
    // A run can't be longer than the slots in a day
    let duration_minutes = run.len() as u32 * u32::from(SLOT_MINUTES);

    Recommendation {
        label: config.locale.label(day.day_of_week, start_time, end_time),
        duration_minutes,
        day_of_week: day.day_of_week,
        start_time,
        end_time,
    }
}
