use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::repository::KeyValueStore;
use crate::collection::models::Game;
use crate::shared::AppError;

pub const COLLECTION_SNAPSHOT_KEY: &str = "collectionSnapshot";
pub const CONFIGURED_IDENTITY_KEY: &str = "configuredIdentity";
pub const USER_ADDED_GAMES_KEY: &str = "userAddedGames";
pub const LAST_REFRESHED_AT_KEY: &str = "lastRefreshedAt";

/// Typed access to persisted state. Reads never fail: unreadable or
/// malformed values are logged and treated as absent.
pub struct GameStore {
    store: Arc<dyn KeyValueStore>,
}

impl GameStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get_item(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read persisted state, treating as absent");
                None
            }
        }
    }

    async fn read_games(&self, key: &str) -> Vec<Game> {
        let Some(raw) = self.read_raw(key).await else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Game>>(&raw) {
            Ok(games) => games,
            Err(e) => {
                warn!(key = %key, error = %e, "Persisted games are malformed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn write_games(&self, key: &str, games: &[Game]) -> Result<(), AppError> {
        let json = serde_json::to_string(games)
            .map_err(|e| AppError::Persistence(e.to_string()))?;
        self.store.set_item(key, &json).await?;
        debug!(key = %key, game_count = games.len(), "Persisted games");
        Ok(())
    }

    /// Last successfully fetched collection, or empty
    #[instrument(skip(self))]
    pub async fn collection_snapshot(&self) -> Vec<Game> {
        self.read_games(COLLECTION_SNAPSHOT_KEY).await
    }

    /// Stores a freshly fetched collection and stamps the refresh time
    #[instrument(skip(self, games))]
    pub async fn save_collection_snapshot(&self, games: &[Game]) -> Result<(), AppError> {
        self.write_games(COLLECTION_SNAPSHOT_KEY, games).await?;
        self.store
            .set_item(LAST_REFRESHED_AT_KEY, &Utc::now().to_rfc3339())
            .await
    }

    pub async fn has_collection(&self) -> bool {
        !self.collection_snapshot().await.is_empty()
    }

    pub async fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.read_raw(LAST_REFRESHED_AT_KEY).await?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    }

    pub async fn configured_identity(&self) -> Option<String> {
        self.read_raw(CONFIGURED_IDENTITY_KEY)
            .await
            .map(|identity| identity.trim().to_string())
            .filter(|identity| !identity.is_empty())
    }

    pub async fn save_configured_identity(&self, identity: &str) -> Result<(), AppError> {
        self.store
            .set_item(CONFIGURED_IDENTITY_KEY, identity.trim())
            .await
    }

    pub async fn user_games(&self) -> Vec<Game> {
        self.read_games(USER_ADDED_GAMES_KEY).await
    }

    pub async fn save_user_games(&self, games: &[Game]) -> Result<(), AppError> {
        self.write_games(USER_ADDED_GAMES_KEY, games).await
    }

    /// Appends a user game and returns the updated list
    pub async fn add_user_game(&self, game: Game) -> Result<Vec<Game>, AppError> {
        let mut games = self.user_games().await;
        games.push(game);
        self.save_user_games(&games).await?;
        Ok(games)
    }

    /// Removes every user game with this id and returns the updated list
    pub async fn remove_user_game(&self, game_id: &str) -> Result<Vec<Game>, AppError> {
        let mut games = self.user_games().await;
        games.retain(|g| g.id != game_id);
        self.save_user_games(&games).await?;
        Ok(games)
    }
}
