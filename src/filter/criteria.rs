use serde::{Deserialize, Serialize};

use crate::collection::GameLength;

/// Highest stop on the complexity slider; selecting it removes the ceiling
pub const COMPLEXITY_SLIDER_MAX: u8 = 6;

/// Constraints for one filter pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub party_size: u32,
    /// Highest acceptable complexity weight; `None` means no ceiling
    pub max_complexity: Option<f64>,
    /// Longest acceptable play time; `None` means any length
    pub max_length: Option<GameLength>,
}

impl FilterCriteria {
    pub fn new(party_size: u32, max_complexity: Option<f64>, max_length: Option<GameLength>) -> Self {
        Self {
            party_size,
            max_complexity,
            max_length,
        }
    }

    /// Player count only, used by "Skip Filters"
    pub fn players_only(party_size: u32) -> Self {
        Self::new(party_size, None, None)
    }
}

/// Maps a slider stop (1..=6) to a complexity ceiling; the top stop means no ceiling
pub fn complexity_ceiling_from_slider(stop: u8) -> Option<f64> {
    let stop = stop.clamp(1, COMPLEXITY_SLIDER_MAX);
    if stop >= COMPLEXITY_SLIDER_MAX {
        None
    } else {
        Some(f64::from(stop))
    }
}

/// Inverse of `complexity_ceiling_from_slider`, for displaying the current stop
pub fn slider_from_complexity_ceiling(ceiling: Option<f64>) -> u8 {
    match ceiling {
        None => COMPLEXITY_SLIDER_MAX,
        Some(c) => (c.round().clamp(1.0, f64::from(COMPLEXITY_SLIDER_MAX))) as u8,
    }
}
