//! Weekly group availability.
//!
//! Members each mark recurring weekly blocks when they can't meet. Given a
//! snapshot of every member's blocks, [`compute_availability`] reports for
//! each day and 30 minute slot who is free, and [`recommend`] picks out the
//! longest windows where the whole group is free.
//!
//! Everything here is a pure function of its inputs. Loading members and
//! persisting their blocks belongs to the caller.

pub mod aggregate;
pub mod config;
pub mod edit;
pub mod error;
pub mod grid;
pub mod level;
pub mod recommend;
pub mod roster;
pub mod time;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use aggregate::{
    compute_availability, compute_default_availability, compute_grid_availability,
    BlockedInterval, DayAvailability, GroupAvailability, MemberSnapshot, TimeSlot,
};
pub use config::{EngineConfig, GridConfig, RecommendationConfig};
pub use error::GridError;
pub use grid::SlotGrid;
pub use level::{default_min_members, AvailabilityLevel, LevelCounts};
pub use recommend::{recommend, recommend_with, Locale, Recommendation};
pub use roster::build_roster;
pub use time::TimeOfDay;
