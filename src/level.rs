use crate::aggregate::{GroupAvailability, TimeSlot};
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much of the group is free in a slot, relative to a minimum head count
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AvailabilityLevel {
    Everyone,
    /// Strictly more than half
    Majority,
    Few,
    /// Fewer than the requested minimum
    Filtered,
}

impl AvailabilityLevel {
    /// # Examples
    /// ```
    /// use moim_libs::AvailabilityLevel;
    ///
    /// assert_eq!(AvailabilityLevel::classify(4, 4, 2), AvailabilityLevel::Everyone);
    /// assert_eq!(AvailabilityLevel::classify(3, 4, 2), AvailabilityLevel::Majority);
    /// assert_eq!(AvailabilityLevel::classify(2, 4, 2), AvailabilityLevel::Few);
    /// assert_eq!(AvailabilityLevel::classify(1, 4, 2), AvailabilityLevel::Filtered);
    /// ```
    pub fn classify(available_count: usize, total_members: usize, min_members: usize) -> AvailabilityLevel {
        if available_count < min_members {
            AvailabilityLevel::Filtered
        } else if available_count == total_members {
            AvailabilityLevel::Everyone
        } else if available_count * 2 > total_members {
            AvailabilityLevel::Majority
        } else {
            AvailabilityLevel::Few
        }
    }
}

/// Starting point for the minimum head count filter: half the group rounded
/// up, and never below one.
pub fn default_min_members(total_members: usize) -> usize {
    let (half, rem) = total_members.div_rem(&2);
    (half + rem).max(1)
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub everyone: usize,
    pub majority: usize,
    pub few: usize,
    pub filtered: usize,
}

impl LevelCounts {
    fn add(&mut self, level: AvailabilityLevel) {
        match level {
            AvailabilityLevel::Everyone => self.everyone += 1,
            AvailabilityLevel::Majority => self.majority += 1,
            AvailabilityLevel::Few => self.few += 1,
            AvailabilityLevel::Filtered => self.filtered += 1,
        }
    }
}

impl TimeSlot {
    pub fn level(&self, total_members: usize, min_members: usize) -> AvailabilityLevel {
        AvailabilityLevel::classify(self.available_count, total_members, min_members)
    }
}

impl GroupAvailability {
    /// Tallies every slot of the week by level
    pub fn count_levels(&self, min_members: usize) -> LevelCounts {
        self.availability
            .iter()
            .flat_map(|day| day.slots.iter())
            .fold(LevelCounts::default(), |mut counts, slot| {
                counts.add(slot.level(self.total_members, min_members));
                counts
            })
    }
}
