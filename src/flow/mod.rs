// Public API - what other modules can use
pub use machine::{
    FetchPurpose, FetchTicket, FlowError, PickerFlow, CONNECT_FAILED_MESSAGE,
    REFRESH_FAILED_MESSAGE,
};
pub use screen::{play_time_label, Screen, WizardStep, PLAY_TIME_OPTIONS};

// Internal modules
mod machine;
mod screen;
