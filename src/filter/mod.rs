// Public API - what other modules can use
pub use criteria::{
    complexity_ceiling_from_slider, slider_from_complexity_ceiling, FilterCriteria,
    COMPLEXITY_SLIDER_MAX,
};
pub use engine::{effective_complexity_weight, filter_games, length_matches};

// Internal modules
mod criteria;
mod engine;
