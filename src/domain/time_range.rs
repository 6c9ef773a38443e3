use serde::{Deserialize, Serialize};

use crate::config::ANALYSIS;
use crate::domain::ticker::SelectionError;
use crate::utils::TimeUtils;

/// Look-back window in minutes, on the 5 minute grid between 5m and 2h.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    minutes: u32,
}

impl TimeRange {
    pub fn new(minutes: u32) -> Result<Self, SelectionError> {
        let config = &ANALYSIS.time_range;
        if minutes < config.min_minutes || minutes > config.max_minutes {
            return Err(SelectionError::TimeRangeOutOfBounds {
                minutes,
                min: config.min_minutes,
                max: config.max_minutes,
            });
        }
        if !minutes.is_multiple_of(config.step_minutes) {
            return Err(SelectionError::TimeRangeOffStep {
                minutes,
                step: config.step_minutes,
            });
        }
        Ok(Self { minutes })
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Every value the slider can take, smallest first
    pub fn all() -> impl Iterator<Item = TimeRange> {
        let config = &ANALYSIS.time_range;
        (config.min_minutes..=config.max_minutes)
            .step_by(config.step_minutes as usize)
            .map(|minutes| TimeRange { minutes })
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            minutes: ANALYSIS.time_range.default_minutes,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", TimeUtils::minutes_to_string(self.minutes))
    }
}
