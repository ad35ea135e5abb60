use whatshouldweplay::collection::models::DEFAULT_GAME_COLOR;
use whatshouldweplay::collection::Complexity;
use whatshouldweplay::{Game, GameLength};

// ============================================================================
// Game Setup Utilities
// ============================================================================

pub struct GameBuilder {
    game: Game,
}

impl GameBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            game: Game {
                id: id.to_string(),
                name: name.to_string(),
                players_min: 1,
                players_max: 4,
                complexity: Complexity::Medium,
                complexity_weight: None,
                length: GameLength::Under1Hour,
                color: DEFAULT_GAME_COLOR.to_string(),
                image: String::new(),
                thumbnail: String::new(),
                year_published: "N/A".to_string(),
                rating: None,
            },
        }
    }

    pub fn players(mut self, min: u32, max: u32) -> Self {
        self.game.players_min = min;
        self.game.players_max = max;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.game.complexity = Complexity::from_average_weight(weight);
        self.game.complexity_weight = Some(weight);
        self
    }

    pub fn length(mut self, length: GameLength) -> Self {
        self.game.length = length;
        self
    }

    pub fn build(self) -> Game {
        self.game
    }
}

/// A small catalog collection: two party games and one long heavy game
pub fn catalog_collection() -> Vec<Game> {
    vec![
        GameBuilder::new("230802", "Azul")
            .players(2, 4)
            .weight(1.8)
            .length(GameLength::Under1Hour)
            .build(),
        GameBuilder::new("178900", "Codenames")
            .players(2, 8)
            .weight(1.3)
            .length(GameLength::Under30Min)
            .build(),
        GameBuilder::new("233078", "Twilight Imperium: Fourth Edition")
            .players(3, 6)
            .weight(4.3)
            .length(GameLength::Long)
            .build(),
    ]
}
