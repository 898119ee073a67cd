use crate::config::{GridConfig, DEFAULT_DISPLAY_END_HOUR, DEFAULT_DISPLAY_START_HOUR};
use crate::error::GridError;
use crate::time::{TimeOfDay, MINUTES_PER_DAY, SLOT_MINUTES};
use num::Integer;

/// There are 48 30-min slots within a day
pub const SLOTS_PER_DAY: usize = (MINUTES_PER_DAY / SLOT_MINUTES) as usize;

/// Every slot start of the day, `00:00` through `23:30`
///
/// # Examples
/// ```
/// use moim_libs::grid::full_day_slots;
///
/// let slots = full_day_slots();
///
/// assert_eq!(slots.len(), 48);
/// assert_eq!(slots[0].to_string(), "00:00");
/// assert_eq!(slots[47].to_string(), "23:30");
/// ```
pub fn full_day_slots() -> Vec<TimeOfDay> {
    (0..SLOTS_PER_DAY as u16)
        .map(|index| TimeOfDay::new(index * SLOT_MINUTES))
        .collect()
}

/// Slot starts whose hour falls in `[start_hour, end_hour)`
///
/// # Examples
/// ```
/// use moim_libs::grid::display_slots;
///
/// let slots = display_slots(9, 24);
///
/// assert_eq!(slots.len(), 30);
/// assert_eq!(slots.first().unwrap().to_string(), "09:00");
/// assert_eq!(slots.last().unwrap().to_string(), "23:30");
/// ```
pub fn display_slots(start_hour: u8, end_hour: u8) -> Vec<TimeOfDay> {
    full_day_slots()
        .into_iter()
        .filter(|slot| slot.hour() >= start_hour && slot.hour() < end_hour)
        .collect()
}

/// Position of a slot start within the full day, if it is on the grid.
/// `24:00` is an end boundary, not a slot, so it is not found.
pub fn index_of(time: TimeOfDay) -> Option<usize> {
    let (index, rem) = time.minutes().div_rem(&SLOT_MINUTES);
    let index = usize::from(index);

    if rem == 0 && index < SLOTS_PER_DAY {
        Some(index)
    } else {
        None
    }
}

/// The boundary 30 minutes after a slot start
///
/// # Errors
/// Anything that is not a slot start, including `24:00`, yields
/// `GridError::OffGrid`.
///
/// # Examples
/// ```
/// use moim_libs::grid::next_slot_boundary;
/// use moim_libs::GridError;
///
/// let next = |s: &str| next_slot_boundary(s.parse().unwrap()).map(|t| t.to_string());
///
/// assert_eq!(next("09:00"), Ok("09:30".to_string()));
/// assert_eq!(next("09:30"), Ok("10:00".to_string()));
/// assert_eq!(next("23:30"), Ok("24:00".to_string()));
/// assert!(matches!(next("09:15"), Err(GridError::OffGrid(_))));
/// ```
pub fn next_slot_boundary(time: TimeOfDay) -> Result<TimeOfDay, GridError> {
    index_of(time)
        .map(|index| TimeOfDay::new((index as u16 + 1) * SLOT_MINUTES))
        .ok_or(GridError::OffGrid(time))
}

/// String form of [`next_slot_boundary`] for callers holding raw `"HH:MM"` values
pub fn next_slot_boundary_str(time: &str) -> Result<String, GridError> {
    next_slot_boundary(time.parse()?).map(|next| next.to_string())
}

/// End of the slot starting at `start`. Off-grid starts round up to the next
/// boundary and nothing goes past `24:00`.
pub fn slot_end(start: TimeOfDay) -> TimeOfDay {
    let next = (start.minutes() / SLOT_MINUTES + 1) * SLOT_MINUTES;
    TimeOfDay::new(next.min(MINUTES_PER_DAY))
}

/// Position of a slot *boundary*, which unlike [`index_of`] accepts `24:00`
pub(crate) fn boundary_index(time: TimeOfDay) -> Option<usize> {
    if time.is_slot_aligned() {
        Some(usize::from(time.minutes() / SLOT_MINUTES))
    } else {
        None
    }
}

/// The display sequence built from a validated `GridConfig`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    start_hour: u8,
    end_hour: u8,
    slots: Vec<TimeOfDay>,
}

impl Default for SlotGrid {
    fn default() -> Self {
        SlotGrid {
            start_hour: DEFAULT_DISPLAY_START_HOUR,
            end_hour: DEFAULT_DISPLAY_END_HOUR,
            slots: display_slots(DEFAULT_DISPLAY_START_HOUR, DEFAULT_DISPLAY_END_HOUR),
        }
    }
}

impl SlotGrid {
    pub fn new(config: &GridConfig) -> Result<SlotGrid, GridError> {
        config.validate()?;

        Ok(SlotGrid {
            start_hour: config.display_start_hour,
            end_hour: config.display_end_hour,
            slots: display_slots(config.display_start_hour, config.display_end_hour),
        })
    }

    pub fn slots(&self) -> &[TimeOfDay] {
        &self.slots
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }
}
