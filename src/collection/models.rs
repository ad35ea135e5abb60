use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Fallback color for games that carry none
pub const DEFAULT_GAME_COLOR: &str = "#ec7e1f";

/// Coarse complexity label, used when a game has no continuous weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
    /// Any label this build does not recognize
    #[serde(other)]
    Unknown,
}

impl Complexity {
    /// Buckets a catalog average weight (0-5 scale) into a label
    pub fn from_average_weight(weight: f64) -> Self {
        if weight < 2.0 {
            Complexity::Low
        } else if weight < 3.5 {
            Complexity::Medium
        } else {
            Complexity::High
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Complexity::Low => "low",
                Complexity::Medium => "medium",
                Complexity::High => "high",
                Complexity::Unknown => "unknown",
            }
        )
    }
}

/// Play time bucket. Declaration order is the ceiling order used by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum GameLength {
    #[serde(rename = "under 30 min")]
    Under30Min,
    #[serde(rename = "under 1 hour")]
    Under1Hour,
    #[serde(rename = "under 2 hours")]
    Under2Hours,
    #[serde(rename = "long")]
    Long,
    #[serde(other, rename = "unknown")]
    Unknown,
}

impl GameLength {
    /// Position in the length ordering; `None` for unrecognized lengths
    pub fn rank(&self) -> Option<u8> {
        match self {
            GameLength::Under30Min => Some(0),
            GameLength::Under1Hour => Some(1),
            GameLength::Under2Hours => Some(2),
            GameLength::Long => Some(3),
            GameLength::Unknown => None,
        }
    }

    /// Buckets a playing time in minutes
    pub fn from_playing_time(minutes: u32) -> Self {
        match minutes {
            0..=30 => GameLength::Under30Min,
            31..=60 => GameLength::Under1Hour,
            61..=120 => GameLength::Under2Hours,
            _ => GameLength::Long,
        }
    }

    /// Short label used by the play-time picker
    pub fn short_label(&self) -> &'static str {
        match self {
            GameLength::Under30Min => "≤30m",
            GameLength::Under1Hour => "≤1h",
            GameLength::Under2Hours => "≤2h",
            GameLength::Long => "3h+",
            GameLength::Unknown => "?",
        }
    }
}

impl fmt::Display for GameLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GameLength::Under30Min => "under 30 min",
                GameLength::Under1Hour => "under 1 hour",
                GameLength::Under2Hours => "under 2 hours",
                GameLength::Long => "long",
                GameLength::Unknown => "unknown",
            }
        )
    }
}

impl TryFrom<&str> for GameLength {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "30" | "30m" => Ok(GameLength::Under30Min),
            "60" | "1h" => Ok(GameLength::Under1Hour),
            "120" | "2h" => Ok(GameLength::Under2Hours),
            label => GameLength::iter()
                .filter(|length| length.rank().is_some())
                .find(|length| length.to_string() == label || length.short_label() == label)
                .ok_or_else(|| s.to_string()),
        }
    }
}

/// A board game in the collection. Games are never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    pub players_min: u32,
    pub players_max: u32,
    pub complexity: Complexity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_weight: Option<f64>,
    pub length: GameLength,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default = "default_year")]
    pub year_published: String,
    #[serde(default)]
    pub rating: Option<String>,
}

fn default_color() -> String {
    DEFAULT_GAME_COLOR.to_string()
}

fn default_year() -> String {
    "N/A".to_string()
}

impl Game {
    /// Whether `party_size` players fit this game
    pub fn supports_players(&self, party_size: u32) -> bool {
        party_size >= self.players_min && party_size <= self.players_max
    }

    /// "2-5 players"
    pub fn players_label(&self) -> String {
        format!("{}-{} players", self.players_min, self.players_max)
    }

    /// Weight with one decimal when known, otherwise the coarse label
    pub fn complexity_label(&self) -> String {
        match self.complexity_weight {
            Some(weight) => format!("{:.1}", weight),
            None => self.complexity.to_string(),
        }
    }
}

/// Ordered collection: catalog (or seed) games followed by user-added games
pub type Collection = Vec<Game>;

/// Concatenates source and user games. Ids and names are not reconciled.
pub fn merge_collection(source_games: Vec<Game>, user_games: Vec<Game>) -> Collection {
    let mut games = source_games;
    games.extend(user_games);
    games
}

/// User input for a new collection entry
#[derive(Debug, Clone, PartialEq)]
pub struct GameDraft {
    pub name: String,
    pub players_min: u32,
    pub players_max: u32,
    pub length: GameLength,
    pub complexity_weight: Option<f64>,
}

impl GameDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Game name cannot be empty".to_string());
        }
        if self.players_min < 1 {
            return Err("A game needs at least one player".to_string());
        }
        if self.players_max < self.players_min {
            return Err(format!(
                "Maximum players ({}) is below minimum players ({})",
                self.players_max, self.players_min
            ));
        }
        if let Some(weight) = self.complexity_weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err("Complexity weight must be a non-negative number".to_string());
            }
        }
        Ok(())
    }

    /// Builds the game record under the given id
    pub fn into_game(self, id: String) -> Game {
        let complexity = self
            .complexity_weight
            .map(Complexity::from_average_weight)
            .unwrap_or(Complexity::Medium);
        Game {
            id,
            name: self.name.trim().to_string(),
            players_min: self.players_min,
            players_max: self.players_max,
            complexity,
            complexity_weight: self.complexity_weight,
            length: self.length,
            color: default_color(),
            image: String::new(),
            thumbnail: String::new(),
            year_published: default_year(),
            rating: None,
        }
    }
}
