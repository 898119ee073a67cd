use crate::aggregate::BlockedInterval;
use crate::error::GridError;
use crate::grid::{self, boundary_index};
use crate::time::{TimeOfDay, SLOT_MINUTES};
use log::trace;

/// Turns a selection of slots on one day into a single interval covering
/// both ends. The slots may be given in either order.
///
/// # Examples
/// ```
/// use moim_libs::edit::interval_from_slot_range;
///
/// let block = interval_from_slot_range(2, "11:30".parse().unwrap(), "10:00".parse().unwrap()).unwrap();
///
/// assert_eq!(block.start_time.to_string(), "10:00");
/// assert_eq!(block.end_time.to_string(), "12:00");
/// ```
pub fn interval_from_slot_range(
    day_of_week: u8,
    first_slot: TimeOfDay,
    last_slot: TimeOfDay,
) -> Result<BlockedInterval, GridError> {
    let (start, last) = if first_slot <= last_slot {
        (first_slot, last_slot)
    } else {
        (last_slot, first_slot)
    };

    if grid::index_of(start).is_none() {
        return Err(GridError::OffGrid(start));
    }

    BlockedInterval::new(day_of_week, start, grid::next_slot_boundary(last)?)
}

/// Index of the first interval blocking `time` on `day_of_week`
pub fn blocked_at(intervals: &[BlockedInterval], day_of_week: u8, time: TimeOfDay) -> Option<usize> {
    intervals
        .iter()
        .position(|interval| interval.day_of_week == day_of_week && interval.range().contains(time))
}

pub fn is_blocked(intervals: &[BlockedInterval], day_of_week: u8, time: TimeOfDay) -> bool {
    blocked_at(intervals, day_of_week, time).is_some()
}

/// A change to one member's intervals that frees a single slot
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SlotEdit {
    Remove {
        index: usize,
    },
    Trim {
        index: usize,
        interval: BlockedInterval,
    },
    Split {
        index: usize,
        left: BlockedInterval,
        right: BlockedInterval,
    },
}

impl SlotEdit {
    /// Applies the edit to the list it was computed from.
    /// Returns false, leaving the list alone, if the index no longer exists.
    pub fn apply(self, intervals: &mut Vec<BlockedInterval>) -> bool {
        match self {
            SlotEdit::Remove { index } if index < intervals.len() => {
                intervals.remove(index);
                true
            }
            SlotEdit::Trim { index, interval } if index < intervals.len() => {
                intervals[index] = interval;
                true
            }
            SlotEdit::Split { index, left, right } if index < intervals.len() => {
                intervals[index] = left;
                intervals.insert(index + 1, right);
                true
            }
            _ => false,
        }
    }
}

/// Works out how to free the 30 minute slot starting at `time`.
///
/// Single-slot intervals are removed, the first or last slot of a longer
/// interval is trimmed off, and an interior slot splits the interval in two.
/// Intervals whose bounds are off the grid can't be cut cleanly and are
/// removed outright. `None` when nothing blocks the slot.
///
/// # Examples
/// ```
/// use moim_libs::edit::{carve_slot, SlotEdit};
/// use moim_libs::BlockedInterval;
///
/// let mut intervals = vec![BlockedInterval::parse(1, "09:00", "12:00").unwrap()];
///
/// let edit = carve_slot(&intervals, 1, "10:00".parse().unwrap()).unwrap();
/// assert!(matches!(edit, SlotEdit::Split { index: 0, .. }));
///
/// edit.apply(&mut intervals);
/// assert_eq!(
///     intervals,
///     vec![
///         BlockedInterval::parse(1, "09:00", "10:00").unwrap(),
///         BlockedInterval::parse(1, "10:30", "12:00").unwrap(),
///     ]
/// );
/// ```
pub fn carve_slot(intervals: &[BlockedInterval], day_of_week: u8, time: TimeOfDay) -> Option<SlotEdit> {
    let index = blocked_at(intervals, day_of_week, time)?;
    let interval = intervals[index];

    let edit = match (
        boundary_index(interval.start_time),
        boundary_index(interval.end_time),
        grid::index_of(time),
    ) {
        (Some(start), Some(end), Some(slot)) => {
            let next = TimeOfDay::new((slot as u16 + 1) * SLOT_MINUTES);

            if end - start <= 1 {
                SlotEdit::Remove { index }
            } else if slot == start {
                SlotEdit::Trim {
                    index,
                    interval: BlockedInterval {
                        start_time: next,
                        ..interval
                    },
                }
            } else if slot == end - 1 {
                SlotEdit::Trim {
                    index,
                    interval: BlockedInterval {
                        end_time: time,
                        ..interval
                    },
                }
            } else {
                SlotEdit::Split {
                    index,
                    left: BlockedInterval {
                        end_time: time,
                        ..interval
                    },
                    right: BlockedInterval {
                        start_time: next,
                        ..interval
                    },
                }
            }
        }
        _ => SlotEdit::Remove { index },
    };

    trace!("Freeing {} on day {}: {:?}", time, day_of_week, edit);

    Some(edit)
}
