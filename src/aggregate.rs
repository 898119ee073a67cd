use crate::config::GridConfig;
use crate::error::GridError;
use crate::grid::{slot_end, SlotGrid};
use crate::time::{TimeMerge, TimeOfDay, TimeRange};
use itertools::Itertools;
use log::{debug, trace};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: u8 = 7;

/// A recurring weekly block during which a member cannot meet.
///
/// Days outside `0..=6` are never matched by the aggregator. They are
/// tolerated rather than rejected so stored data can't break a whole group.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BlockedInterval {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient_day"))]
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Out-of-range days, negative ones included, become `u8::MAX` so the block
/// stays inert instead of failing the whole member list.
#[cfg(feature = "serde")]
fn lenient_day<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let day = i32::deserialize(deserializer)?;

    Ok(u8::try_from(day)
        .ok()
        .filter(|&day| day < DAYS_PER_WEEK)
        .unwrap_or(u8::MAX))
}

impl BlockedInterval {
    /// Constructs a validated interval, as the editing surface should
    /// before persisting one.
    pub fn new(
        day_of_week: u8,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Result<BlockedInterval, GridError> {
        if day_of_week >= DAYS_PER_WEEK {
            return Err(GridError::InvalidDayOfWeek(day_of_week));
        }
        if start_time >= end_time {
            return Err(GridError::EmptyInterval {
                start: start_time,
                end: end_time,
            });
        }

        Ok(BlockedInterval {
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// # Examples
    /// ```
    /// use moim_libs::BlockedInterval;
    ///
    /// let block = BlockedInterval::parse(1, "10:00", "11:00").unwrap();
    /// assert_eq!(block.range().duration_minutes(), 60);
    ///
    /// assert!(BlockedInterval::parse(1, "11:00", "10:00").is_err());
    /// assert!(BlockedInterval::parse(1, "10:00", "11").is_err());
    /// ```
    pub fn parse(day_of_week: u8, start_time: &str, end_time: &str) -> Result<BlockedInterval, GridError> {
        BlockedInterval::new(day_of_week, start_time.parse()?, end_time.parse()?)
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "timeBlocks", default))]
    pub intervals: Vec<BlockedInterval>,
}

impl MemberSnapshot {
    pub fn new(id: &str, name: &str, intervals: Vec<BlockedInterval>) -> MemberSnapshot {
        MemberSnapshot {
            id: id.to_string(),
            name: name.to_string(),
            intervals,
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Always `available_members.len()`
    pub available_count: usize,
    pub available_members: Vec<String>,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub day_of_week: u8,
    pub slots: Vec<TimeSlot>,
}

impl DayAvailability {
    pub fn slot_at(&self, start_time: TimeOfDay) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.start_time == start_time)
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAvailability {
    pub total_members: usize,
    /// One entry per day of the week, in day order
    pub availability: Vec<DayAvailability>,
}

impl GroupAvailability {
    pub fn day(&self, day_of_week: u8) -> Option<&DayAvailability> {
        self.availability
            .iter()
            .find(|day| day.day_of_week == day_of_week)
    }

    pub fn slot(&self, day_of_week: u8, start_time: TimeOfDay) -> Option<&TimeSlot> {
        self.day(day_of_week)
            .and_then(|day| day.slot_at(start_time))
    }
}

/// A member's blocks indexed by day, sorted and merged
struct WeeklyBlocks([Vec<TimeRange>; DAYS_PER_WEEK as usize]);

impl WeeklyBlocks {
    fn new(intervals: &[BlockedInterval]) -> WeeklyBlocks {
        let mut by_day: [Vec<TimeRange>; DAYS_PER_WEEK as usize] = Default::default();

        for (day, ranges) in intervals
            .iter()
            .filter(|interval| interval.day_of_week < DAYS_PER_WEEK)
            .map(|interval| (interval.day_of_week, interval.range()))
            .into_group_map()
        {
            by_day[usize::from(day)] = ranges
                .iter()
                .sorted_unstable_by_key(|range| range.start)
                .time_merge();
        }

        WeeklyBlocks(by_day)
    }

    fn is_blocked(&self, day_of_week: u8, time: TimeOfDay) -> bool {
        self.0[usize::from(day_of_week)]
            .iter()
            .any(|range| range.contains(time))
    }
}

/// Computes, for each day of the week and each slot in `slots`, which members
/// are free.
///
/// A member is free in a slot when none of their blocks on that day contain
/// the slot's start (`start <= slot < end`). Member order is kept as given
/// and nothing is deduplicated.
///
/// # Examples
/// ```
/// use moim_libs::{compute_availability, grid::display_slots, BlockedInterval, MemberSnapshot};
///
/// let members = vec![
///     MemberSnapshot::new("a", "Ana", vec![BlockedInterval::parse(1, "09:00", "10:00").unwrap()]),
///     MemberSnapshot::new("b", "Ben", vec![]),
/// ];
///
/// let result = compute_availability(&members, &display_slots(9, 12));
///
/// assert_eq!(result.total_members, 2);
/// assert_eq!(result.availability.len(), 7);
///
/// let monday_nine = result.slot(1, "09:00".parse().unwrap()).unwrap();
/// assert_eq!(monday_nine.available_members, vec!["Ben".to_string()]);
/// assert_eq!(monday_nine.end_time.to_string(), "09:30");
/// ```
pub fn compute_availability(members: &[MemberSnapshot], slots: &[TimeOfDay]) -> GroupAvailability {
    debug!(
        "Computing availability for {} members across {} slots",
        members.len(),
        slots.len()
    );

    let weekly_blocks = members
        .iter()
        .map(|member| WeeklyBlocks::new(&member.intervals))
        .collect_vec();

    let day_availability = |day_of_week: u8| {
        let slots = slots
            .iter()
            .map(|&start_time| {
                let available_members = members
                    .iter()
                    .zip(weekly_blocks.iter())
                    .filter(|(_, blocks)| !blocks.is_blocked(day_of_week, start_time))
                    .map(|(member, _)| member.name.clone())
                    .collect_vec();

                TimeSlot {
                    start_time,
                    end_time: slot_end(start_time),
                    available_count: available_members.len(),
                    available_members,
                }
            })
            .collect_vec();

        trace!(
            "Day {}: {} slots with everyone free",
            day_of_week,
            slots
                .iter()
                .filter(|slot| slot.available_count == members.len())
                .count()
        );

        DayAvailability { day_of_week, slots }
    };

    #[cfg(feature = "rayon")]
    let availability = (0..DAYS_PER_WEEK)
        .into_par_iter()
        .map(day_availability)
        .collect();

    #[cfg(not(feature = "rayon"))]
    let availability = (0..DAYS_PER_WEEK).map(day_availability).collect();

    GroupAvailability {
        total_members: members.len(),
        availability,
    }
}

/// [`compute_availability`] over the default `09:00`–`24:00` display window
pub fn compute_default_availability(members: &[MemberSnapshot]) -> GroupAvailability {
    compute_availability(members, SlotGrid::default().slots())
}

/// [`compute_availability`] over the window described by `config`, or the
/// default one when there is none.
///
/// # Examples
/// ```
/// use moim_libs::{aggregate::compute_grid_availability, GridConfig};
///
/// let config = GridConfig { display_start_hour: 20, display_end_hour: 22 };
/// let result = compute_grid_availability(&[], Some(&config)).unwrap();
/// assert_eq!(result.availability[0].slots.len(), 4);
///
/// let inverted = GridConfig { display_start_hour: 22, display_end_hour: 20 };
/// assert!(compute_grid_availability(&[], Some(&inverted)).is_err());
/// ```
pub fn compute_grid_availability(
    members: &[MemberSnapshot],
    config: Option<&GridConfig>,
) -> Result<GroupAvailability, GridError> {
    let grid = match config {
        Some(config) => SlotGrid::new(config)?,
        None => SlotGrid::default(),
    };
    debug!(
        "Using display window {}:00 to {}:00",
        grid.start_hour(),
        grid.end_hour()
    );

    Ok(compute_availability(members, grid.slots()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{display_slots, full_day_slots};

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn block(day: u8, start: &str, end: &str) -> BlockedInterval {
        BlockedInterval::parse(day, start, end).unwrap()
    }

    #[test]
    fn free_members_are_available_everywhere() {
        let members = vec![
            MemberSnapshot::new("1", "Ana", vec![]),
            MemberSnapshot::new("2", "Ben", vec![]),
            MemberSnapshot::new("3", "Cho", vec![]),
        ];

        let result = compute_default_availability(&members);

        assert_eq!(result.total_members, 3);
        for (day, availability) in result.availability.iter().enumerate() {
            assert_eq!(usize::from(availability.day_of_week), day);
            assert_eq!(availability.slots.len(), 30);
            for slot in &availability.slots {
                assert_eq!(slot.available_count, 3);
                assert_eq!(slot.available_members, vec!["Ana", "Ben", "Cho"]);
            }
        }
    }

    #[test]
    fn containment_is_half_open() {
        let members = vec![MemberSnapshot::new("1", "Ana", vec![block(1, "10:00", "11:00")])];

        let result = compute_default_availability(&members);

        assert_eq!(result.slot(1, t("09:30")).unwrap().available_count, 1);
        assert_eq!(result.slot(1, t("10:00")).unwrap().available_count, 0);
        assert_eq!(result.slot(1, t("10:30")).unwrap().available_count, 0);
        assert_eq!(result.slot(1, t("11:00")).unwrap().available_count, 1);
    }

    #[test]
    fn minute_granular_blocks() {
        // 10:10~10:40 contains the 10:30 slot start but not 10:00
        let members = vec![MemberSnapshot::new("1", "Ana", vec![block(4, "10:10", "10:40")])];

        let result = compute_default_availability(&members);

        assert_eq!(result.slot(4, t("10:00")).unwrap().available_count, 1);
        assert_eq!(result.slot(4, t("10:30")).unwrap().available_count, 0);
        assert_eq!(result.slot(4, t("11:00")).unwrap().available_count, 1);
    }

    #[test]
    fn days_are_isolated() {
        let members = vec![MemberSnapshot::new("1", "Ana", vec![block(2, "09:00", "24:00")])];

        let result = compute_default_availability(&members);

        for day in &result.availability {
            let blocked = day.slots.iter().filter(|slot| slot.available_count == 0).count();
            if day.day_of_week == 2 {
                assert_eq!(blocked, day.slots.len());
            } else {
                assert_eq!(blocked, 0);
            }
        }
    }

    #[test]
    fn out_of_range_days_are_inert() {
        let inert = BlockedInterval {
            day_of_week: 7,
            start_time: t("00:00"),
            end_time: t("24:00"),
        };
        let far = BlockedInterval {
            day_of_week: 200,
            ..inert
        };
        let members = vec![MemberSnapshot::new("1", "Ana", vec![inert, far])];

        let result = compute_availability(&members, &full_day_slots());

        assert!(result
            .availability
            .iter()
            .flat_map(|day| day.slots.iter())
            .all(|slot| slot.available_count == 1));
    }

    #[test]
    fn overlapping_blocks_behave_like_their_union() {
        let overlapping = vec![MemberSnapshot::new(
            "1",
            "Ana",
            vec![
                block(3, "12:00", "13:00"),
                block(3, "09:00", "10:30"),
                block(3, "10:00", "11:00"),
                block(3, "11:00", "11:30"),
            ],
        )];
        let union = vec![MemberSnapshot::new(
            "1",
            "Ana",
            vec![block(3, "09:00", "11:30"), block(3, "12:00", "13:00")],
        )];

        assert_eq!(
            compute_default_availability(&overlapping),
            compute_default_availability(&union)
        );
    }

    #[test]
    fn keeps_input_order_and_duplicates() {
        let members = vec![
            MemberSnapshot::new("3", "Zed", vec![]),
            MemberSnapshot::new("1", "Amy", vec![block(0, "09:00", "09:30")]),
            MemberSnapshot::new("3", "Zed", vec![]),
            MemberSnapshot::new("2", "", vec![]),
        ];

        let result = compute_default_availability(&members);

        assert_eq!(result.total_members, 4);
        assert_eq!(
            result.slot(0, t("09:00")).unwrap().available_members,
            vec!["Zed", "Zed", ""]
        );
        assert_eq!(
            result.slot(0, t("09:30")).unwrap().available_members,
            vec!["Zed", "Amy", "Zed", ""]
        );
    }

    #[test]
    fn no_members() {
        let result = compute_default_availability(&[]);

        assert_eq!(result.total_members, 0);
        assert_eq!(result.availability.len(), 7);
        assert!(result
            .availability
            .iter()
            .flat_map(|day| day.slots.iter())
            .all(|slot| slot.available_count == 0 && slot.available_members.is_empty()));
    }

    #[test]
    fn slot_ends_follow_the_full_grid() {
        let result = compute_availability(&[], &[t("23:30"), t("09:15"), t("00:00")]);
        let monday = result.day(1).unwrap();

        let ends = monday.slots.iter().map(|slot| slot.end_time).collect_vec();
        assert_eq!(ends, vec![t("24:00"), t("09:30"), t("00:30")]);
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let members = vec![
            MemberSnapshot::new("1", "Ana", vec![block(1, "09:00", "12:00"), block(5, "18:00", "20:00")]),
            MemberSnapshot::new("2", "Ben", vec![block(1, "11:00", "14:00")]),
        ];

        assert_eq!(
            compute_availability(&members, &display_slots(0, 24)),
            compute_availability(&members, &display_slots(0, 24))
        );
    }

    #[test]
    fn count_matches_member_list() {
        let members = vec![
            MemberSnapshot::new("1", "Ana", vec![block(1, "09:00", "12:00")]),
            MemberSnapshot::new("2", "Ben", vec![block(1, "11:00", "14:00"), block(6, "00:00", "24:00")]),
            MemberSnapshot::new("3", "Cho", vec![block(1, "13:30", "15:00")]),
        ];

        let result = compute_availability(&members, &full_day_slots());

        for slot in result.availability.iter().flat_map(|day| day.slots.iter()) {
            assert_eq!(slot.available_count, slot.available_members.len());
            assert!(slot.available_count <= result.total_members);
        }
    }

    #[test]
    fn validated_constructor() {
        assert_eq!(
            BlockedInterval::new(7, t("09:00"), t("10:00")),
            Err(GridError::InvalidDayOfWeek(7))
        );
        assert_eq!(
            BlockedInterval::new(1, t("10:00"), t("10:00")),
            Err(GridError::EmptyInterval {
                start: t("10:00"),
                end: t("10:00")
            })
        );
    }

    #[test]
    fn custom_window_through_config() {
        let members = vec![MemberSnapshot::new("1", "Ana", vec![block(2, "20:00", "21:00")])];
        let config = GridConfig {
            display_start_hour: 20,
            display_end_hour: 24,
        };

        let result = compute_grid_availability(&members, Some(&config)).unwrap();

        assert_eq!(result.availability[2].slots.len(), 8);
        assert_eq!(result.availability[2].slots[0].start_time, t("20:00"));
        assert_eq!(result.availability[2].slots[0].available_count, 0);
        assert_eq!(result.availability[2].slots[2].available_count, 1);

        assert_eq!(
            compute_grid_availability(&members, None).unwrap(),
            compute_default_availability(&members)
        );
        assert_eq!(
            compute_grid_availability(
                &members,
                Some(&GridConfig {
                    display_start_hour: 9,
                    display_end_hour: 25
                })
            ),
            Err(GridError::InvalidDisplayWindow {
                start_hour: 9,
                end_hour: 25
            })
        );
    }
}
