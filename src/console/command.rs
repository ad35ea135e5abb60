use crate::collection::{GameDraft, GameLength};
use crate::flow::{Screen, WizardStep, PLAY_TIME_OPTIONS};
use crate::vote::VoteDelta;

/// Everything a user can ask for, already resolved against the current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Back,
    Connect(String),
    StartWizard,
    OpenMyGames,
    ChangeIdentity,
    AddGame(GameDraft),
    RemoveGame(String),
    Refresh,
    AdjustPartySize(i64),
    SetPartySize(u32),
    NextStep,
    SetComplexity(u8),
    SetPlayTime(Option<GameLength>),
    FindGames,
    SkipFilters,
    /// 1-based position in the results list
    Vote { position: usize, delta: VoteDelta },
    OpenSpinner,
    Spin,
    PlayThis,
    SpinAgain,
    StartOver,
    PickAgain,
}

/// Parses one input line for `screen`. Errors carry a message for the user.
pub fn parse_command(screen: Screen, line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = split_word(line);
    let word = word.to_lowercase();

    match word.as_str() {
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "help" | "?" => return Ok(Command::Help),
        "back" | "b" => return Ok(Command::Back),
        _ => {}
    }

    match screen {
        Screen::Splash => Err("Loading, one moment".to_string()),
        Screen::ConnectIdentity => match word.as_str() {
            "" => Err("Enter your BoardGameGeek username".to_string()),
            _ => Ok(Command::Connect(line.to_string())),
        },
        Screen::Home => match word.as_str() {
            "1" | "choose" | "c" => Ok(Command::StartWizard),
            "2" | "games" | "g" => Ok(Command::OpenMyGames),
            "3" | "username" | "u" => Ok(Command::ChangeIdentity),
            _ => Err(unknown(line)),
        },
        Screen::MyGames => match word.as_str() {
            "add" | "a" => parse_draft(rest).map(Command::AddGame),
            "remove" | "rm" => match rest.trim() {
                "" => Err("Usage: remove <game id>".to_string()),
                id => Ok(Command::RemoveGame(id.to_string())),
            },
            "refresh" | "r" => Ok(Command::Refresh),
            _ => Err(unknown(line)),
        },
        Screen::Wizard(WizardStep::PartySize) => match word.as_str() {
            "+" => Ok(Command::AdjustPartySize(1)),
            "-" => Ok(Command::AdjustPartySize(-1)),
            "" | "next" | "n" => Ok(Command::NextStep),
            "skip" | "s" => Ok(Command::SkipFilters),
            number => number
                .parse::<u32>()
                .map(Command::SetPartySize)
                .map_err(|_| unknown(line)),
        },
        Screen::Wizard(WizardStep::Filters) => match word.as_str() {
            "complexity" | "c" => rest
                .trim()
                .parse::<u8>()
                .map(Command::SetComplexity)
                .map_err(|_| "Usage: complexity <1-6>".to_string()),
            "time" | "t" => parse_play_time(rest).map(Command::SetPlayTime),
            "" | "find" | "f" => Ok(Command::FindGames),
            "skip" | "s" => Ok(Command::SkipFilters),
            _ => Err(unknown(line)),
        },
        Screen::Results => match word.as_str() {
            "" | "spin" | "select" => Ok(Command::OpenSpinner),
            vote => parse_vote(vote).ok_or_else(|| unknown(line)),
        },
        Screen::Spinner => match word.as_str() {
            "" | "spin" => Ok(Command::Spin),
            "play" | "p" => Ok(Command::PlayThis),
            "again" | "a" => Ok(Command::SpinAgain),
            _ => Err(unknown(line)),
        },
        Screen::SelectedGame => match word.as_str() {
            "over" | "start" | "o" => Ok(Command::StartOver),
            "again" | "pick" | "a" => Ok(Command::PickAgain),
            _ => Err(unknown(line)),
        },
    }
}

fn split_word(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    }
}

fn unknown(line: &str) -> String {
    format!("Unknown command '{}'. Type help for options.", line)
}

/// `+3` adds a vote to the third game, `-3` removes one
fn parse_vote(word: &str) -> Option<Command> {
    let (delta, position) = if let Some(position) = word.strip_prefix('+') {
        (VoteDelta::Add, position)
    } else if let Some(position) = word.strip_prefix('-') {
        (VoteDelta::Remove, position)
    } else {
        return None;
    };
    let position = position.parse::<usize>().ok().filter(|p| *p >= 1)?;
    Some(Command::Vote { position, delta })
}

/// `any`, an option number (1-5) or a length label
fn parse_play_time(arg: &str) -> Result<Option<GameLength>, String> {
    let arg = arg.trim();
    if arg.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    if let Ok(option) = arg.parse::<usize>() {
        return option
            .checked_sub(1)
            .and_then(|i| PLAY_TIME_OPTIONS.get(i))
            .copied()
            .ok_or_else(|| format!("Pick a play time between 1 and {}", PLAY_TIME_OPTIONS.len()));
    }
    GameLength::try_from(arg)
        .map(Some)
        .map_err(|_| format!("Unknown play time '{}'", arg))
}

/// `Name; min-max; length[; weight]`
fn parse_draft(arg: &str) -> Result<GameDraft, String> {
    const USAGE: &str = "Usage: add <name>; <min>-<max>; <length>[; <weight>]";

    let parts: Vec<&str> = arg.split(';').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(USAGE.to_string());
    }

    let (players_min, players_max) = match parts[1].split_once('-') {
        Some((min, max)) => (parse_count(min)?, parse_count(max)?),
        None => {
            let count = parse_count(parts[1])?;
            (count, count)
        }
    };
    let length = GameLength::try_from(parts[2]).map_err(|_| format!("Unknown play time '{}'", parts[2]))?;
    let complexity_weight = match parts.get(3) {
        Some(weight) => Some(
            weight
                .parse::<f64>()
                .map_err(|_| format!("Invalid complexity weight '{}'", weight))?,
        ),
        None => None,
    };

    let draft = GameDraft {
        name: parts[0].to_string(),
        players_min,
        players_max,
        length,
        complexity_weight,
    };
    draft.validate()?;
    Ok(draft)
}

fn parse_count(s: &str) -> Result<u32, String> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid player count '{}'", s.trim()))
}
