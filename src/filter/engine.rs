use tracing::debug;

use super::criteria::FilterCriteria;
use crate::collection::{Complexity, Game, GameLength};

/// Weight used for a game with no continuous measure. The label mapping is a
/// fixed calibration: low 1.5, medium 2.5, high 4, anything else 5.
pub fn effective_complexity_weight(game: &Game) -> f64 {
    if let Some(weight) = game.complexity_weight {
        return weight;
    }
    match game.complexity {
        Complexity::Low => 1.5,
        Complexity::Medium => 2.5,
        Complexity::High => 4.0,
        Complexity::Unknown => 5.0,
    }
}

/// `long` is an exact-match filter; every other ceiling is "at most".
pub fn length_matches(max_length: Option<GameLength>, game_length: GameLength) -> bool {
    let Some(max_length) = max_length else {
        return true;
    };
    if max_length == GameLength::Long {
        return game_length == GameLength::Long;
    }
    match (max_length.rank(), game_length.rank()) {
        (Some(max_rank), Some(game_rank)) => game_rank <= max_rank,
        _ => false,
    }
}

pub fn complexity_matches(max_complexity: Option<f64>, game: &Game) -> bool {
    match max_complexity {
        None => true,
        Some(ceiling) => effective_complexity_weight(game) <= ceiling,
    }
}

/// Whether a game passes all three predicates
pub fn matches(game: &Game, criteria: &FilterCriteria) -> bool {
    game.supports_players(criteria.party_size)
        && complexity_matches(criteria.max_complexity, game)
        && length_matches(criteria.max_length, game.length)
}

/// Eligible subsequence of `games`, order preserved
pub fn filter_games(games: &[Game], criteria: &FilterCriteria) -> Vec<Game> {
    let filtered: Vec<Game> = games
        .iter()
        .filter(|game| matches(game, criteria))
        .cloned()
        .collect();

    debug!(
        party_size = criteria.party_size,
        max_complexity = ?criteria.max_complexity,
        max_length = ?criteria.max_length,
        total = games.len(),
        eligible = filtered.len(),
        "Filtered collection"
    );

    filtered
}
