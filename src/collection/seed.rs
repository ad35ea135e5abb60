// Bundled games for offline use and for when the catalog cannot be reached.

use super::models::{Complexity, Game, GameLength, DEFAULT_GAME_COLOR};

/// Identity that loads the bundled seed set instead of calling the catalog
pub const SEED_IDENTITY: &str = "demo";

pub fn is_seed_identity(identity: &str) -> bool {
    identity.trim().eq_ignore_ascii_case(SEED_IDENTITY)
}

fn seed_game(
    id: &str,
    name: &str,
    players: (u32, u32),
    complexity: Complexity,
    weight: f64,
    length: GameLength,
    (year, rating): (&str, &str),
) -> Game {
    Game {
        id: id.to_string(),
        name: name.to_string(),
        players_min: players.0,
        players_max: players.1,
        complexity,
        complexity_weight: Some(weight),
        length,
        color: DEFAULT_GAME_COLOR.to_string(),
        image: String::new(),
        thumbnail: String::new(),
        year_published: year.to_string(),
        rating: Some(rating.to_string()),
    }
}

pub fn seed_games() -> Vec<Game> {
    vec![
        seed_game(
            "1738",
            "Castle of Magic",
            (4, 6),
            Complexity::Medium,
            2.5,
            GameLength::Under2Hours,
            ("1991", "8"),
        ),
        seed_game(
            "325409",
            "Fantasy Fluxx",
            (2, 6),
            Complexity::Low,
            1.2,
            GameLength::Under1Hour,
            ("2021", "6"),
        ),
        seed_game(
            "19857",
            "Glory to Rome",
            (2, 5),
            Complexity::Medium,
            2.8,
            GameLength::Under1Hour,
            ("2005", "7"),
        ),
        seed_game(
            "70323",
            "King of Tokyo",
            (2, 6),
            Complexity::Low,
            1.5,
            GameLength::Under30Min,
            ("2011", "9"),
        ),
        seed_game(
            "392023",
            "Mycelia",
            (1, 4),
            Complexity::Low,
            1.8,
            GameLength::Under1Hour,
            ("2023", "10"),
        ),
        seed_game(
            "266192",
            "Wingspan",
            (1, 5),
            Complexity::Medium,
            2.4,
            GameLength::Under2Hours,
            ("2019", "8"),
        ),
    ]
}
