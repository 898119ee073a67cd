use crate::error::GridError;
use crate::recommend::Locale;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const DEFAULT_DISPLAY_START_HOUR: u8 = 9;
pub const DEFAULT_DISPLAY_END_HOUR: u8 = 24;
pub const DEFAULT_MIN_RUN_SLOTS: usize = 2;
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Hours of the day surfaced to aggregation and to the UI, `[start, end)`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub display_start_hour: u8,
    pub display_end_hour: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            display_start_hour: DEFAULT_DISPLAY_START_HOUR,
            display_end_hour: DEFAULT_DISPLAY_END_HOUR,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.display_start_hour < self.display_end_hour && self.display_end_hour <= 24 {
            Ok(())
        } else {
            Err(GridError::InvalidDisplayWindow {
                start_hour: self.display_start_hour,
                end_hour: self.display_end_hour,
            })
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RecommendationConfig {
    /// Shortest run of fully available slots worth recommending
    pub min_run_slots: usize,
    pub limit: usize,
    pub locale: Locale,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        RecommendationConfig {
            min_run_slots: DEFAULT_MIN_RUN_SLOTS,
            limit: DEFAULT_RECOMMENDATION_LIMIT,
            locale: Locale::default(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub grid: GridConfig,
    pub recommendation: RecommendationConfig,
}

impl EngineConfig {
    /// Defaults overridden by any parsable `MOIM_*` environment variable.
    /// Unset or unparsable values fall back silently.
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();

        EngineConfig {
            grid: GridConfig {
                display_start_hour: env_value("MOIM_DISPLAY_START_HOUR")
                    .unwrap_or(defaults.grid.display_start_hour),
                display_end_hour: env_value("MOIM_DISPLAY_END_HOUR")
                    .unwrap_or(defaults.grid.display_end_hour),
            },
            recommendation: RecommendationConfig {
                min_run_slots: env_value("MOIM_MIN_RUN_SLOTS")
                    .unwrap_or(defaults.recommendation.min_run_slots),
                limit: env_value("MOIM_RECOMMENDATION_LIMIT")
                    .unwrap_or(defaults.recommendation.limit),
                ..defaults.recommendation
            },
        }
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).map(|e| e.parse::<T>().ok()).ok().flatten()
}
