use strum_macros::{Display, EnumIter};

use crate::collection::GameLength;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum WizardStep {
    #[strum(to_string = "Step 1 of 2")]
    PartySize,
    #[strum(to_string = "Step 2 of 2")]
    Filters,
}

/// Every screen the picker can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Screen {
    #[strum(to_string = "splash")]
    Splash,
    #[strum(to_string = "connect")]
    ConnectIdentity,
    #[strum(to_string = "home")]
    Home,
    #[strum(to_string = "my games")]
    MyGames,
    #[strum(to_string = "wizard")]
    Wizard(WizardStep),
    #[strum(to_string = "results")]
    Results,
    #[strum(to_string = "spinner")]
    Spinner,
    #[strum(to_string = "selected game")]
    SelectedGame,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Splash | Screen::Home => "What Should We Play?",
            Screen::ConnectIdentity => "Connect Your Collection",
            Screen::MyGames => "My Games",
            Screen::Wizard(_) => "Choose a Game",
            Screen::Results | Screen::Spinner => "Your Options",
            Screen::SelectedGame => "Selected Game",
        }
    }
}

/// Play-time picker options in display order; `None` is "Any"
pub const PLAY_TIME_OPTIONS: [Option<GameLength>; 5] = [
    None,
    Some(GameLength::Under30Min),
    Some(GameLength::Under1Hour),
    Some(GameLength::Under2Hours),
    Some(GameLength::Long),
];

pub fn play_time_label(option: Option<GameLength>) -> &'static str {
    match option {
        None => "Any",
        Some(length) => length.short_label(),
    }
}
