use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    catalog::CatalogClient,
    models::{merge_collection, Collection, Game, GameDraft},
    seed::{is_seed_identity, seed_games},
};
use crate::shared::AppError;
use crate::storage::GameStore;

/// Where the source half of a collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOrigin {
    Catalog,
    Snapshot,
    Seed,
}

/// Fetched games that are not saved yet
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSnapshot {
    pub identity: String,
    pub source: Vec<Game>,
}

/// A successful fetch, merged with user games but not persisted
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedCollection {
    pub collection: Collection,
    pub origin: CollectionOrigin,
    pub snapshot: PendingSnapshot,
}

/// Result of a refresh that never fails outright
#[derive(Debug)]
pub struct RefreshOutcome {
    pub collection: Collection,
    pub origin: CollectionOrigin,
    /// The fetch failure that forced a fallback, if any
    pub error: Option<AppError>,
    /// What to save once the result is accepted; `None` for fallbacks
    pub snapshot: Option<PendingSnapshot>,
}

impl RefreshOutcome {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Service for loading and refreshing the game collection
pub struct CollectionService {
    store: Arc<GameStore>,
    catalog: Arc<dyn CatalogClient>,
}

impl CollectionService {
    pub fn new(store: Arc<GameStore>, catalog: Arc<dyn CatalogClient>) -> Self {
        Self { store, catalog }
    }

    /// Cached snapshot (or the seed set when nothing is cached) followed by user games
    #[instrument(skip(self))]
    pub async fn load(&self) -> Collection {
        let (source, origin) = self.cached_source().await;
        let user_games = self.store.user_games().await;
        debug!(
            source_count = source.len(),
            user_count = user_games.len(),
            ?origin,
            "Loaded collection"
        );
        merge_collection(source, user_games)
    }

    async fn cached_source(&self) -> (Vec<Game>, CollectionOrigin) {
        let snapshot = self.store.collection_snapshot().await;
        if snapshot.is_empty() {
            (seed_games(), CollectionOrigin::Seed)
        } else {
            (snapshot, CollectionOrigin::Snapshot)
        }
    }

    async fn fetch_source(&self, identity: &str) -> Result<(Vec<Game>, CollectionOrigin), AppError> {
        if is_seed_identity(identity) {
            info!(identity = %identity, "Reserved identity, using bundled seed games");
            return Ok((seed_games(), CollectionOrigin::Seed));
        }
        let games = self.catalog.fetch_collection(identity.trim()).await?;
        Ok((games, CollectionOrigin::Catalog))
    }

    /// Fetches the collection for `identity` without touching storage.
    /// The caller saves it with `persist_refresh` once the result is accepted.
    #[instrument(skip(self))]
    pub async fn refresh(&self, identity: &str) -> Result<FetchedCollection, AppError> {
        let (source, origin) = self.fetch_source(identity).await?;
        info!(identity = %identity, game_count = source.len(), ?origin, "Collection fetched");

        let user_games = self.store.user_games().await;
        Ok(FetchedCollection {
            collection: merge_collection(source.clone(), user_games),
            origin,
            snapshot: PendingSnapshot {
                identity: identity.to_string(),
                source,
            },
        })
    }

    /// Like `refresh`, but a failed fetch degrades to the cached snapshot or the seed set
    #[instrument(skip(self))]
    pub async fn refresh_or_fallback(&self, identity: &str) -> RefreshOutcome {
        match self.refresh(identity).await {
            Ok(fetched) => RefreshOutcome {
                collection: fetched.collection,
                origin: fetched.origin,
                error: None,
                snapshot: Some(fetched.snapshot),
            },
            Err(e) => {
                warn!(identity = %identity, error = %e, "Refresh failed, falling back to cached games");
                let (source, origin) = self.cached_source().await;
                let user_games = self.store.user_games().await;
                RefreshOutcome {
                    collection: merge_collection(source, user_games),
                    origin,
                    error: Some(e),
                    snapshot: None,
                }
            }
        }
    }

    /// Saves an accepted fetch: snapshot, refresh time, then identity.
    /// Persistence failures are logged.
    #[instrument(skip(self, snapshot), fields(identity = %snapshot.identity))]
    pub async fn persist_refresh(&self, snapshot: &PendingSnapshot) {
        if let Err(e) = self.store.save_collection_snapshot(&snapshot.source).await {
            warn!(error = %e, "Failed to persist collection snapshot");
        }
        if let Err(e) = self.store.save_configured_identity(&snapshot.identity).await {
            warn!(error = %e, "Failed to persist configured identity");
        }
        debug!(game_count = snapshot.source.len(), "Collection snapshot saved");
    }

    /// Refreshes using the stored identity; without one, just loads
    pub async fn refresh_configured(&self) -> RefreshOutcome {
        match self.store.configured_identity().await {
            Some(identity) => self.refresh_or_fallback(&identity).await,
            None => {
                let (source, origin) = self.cached_source().await;
                let user_games = self.store.user_games().await;
                RefreshOutcome {
                    collection: merge_collection(source, user_games),
                    origin,
                    error: None,
                    snapshot: None,
                }
            }
        }
    }

    pub async fn configured_identity(&self) -> Option<String> {
        self.store.configured_identity().await
    }

    /// Whether a non-empty snapshot is cached; decides the first screen
    pub async fn has_collection(&self) -> bool {
        self.store.has_collection().await
    }

    pub async fn user_games(&self) -> Vec<Game> {
        self.store.user_games().await
    }

    /// Validates and stores a user game under a fresh `user-<uuid>` id
    #[instrument(skip(self))]
    pub async fn add_user_game(&self, draft: GameDraft) -> Result<Game, AppError> {
        draft.validate().map_err(AppError::InvalidGame)?;
        let game = draft.into_game(format!("user-{}", Uuid::new_v4()));
        self.store.add_user_game(game.clone()).await?;
        info!(game_id = %game.id, name = %game.name, "User game added");
        Ok(game)
    }

    /// Returns whether a game with this id was removed
    #[instrument(skip(self))]
    pub async fn remove_user_game(&self, game_id: &str) -> Result<bool, AppError> {
        let before = self.store.user_games().await.len();
        let after = self.store.remove_user_game(game_id).await?.len();
        let removed = after < before;
        if removed {
            info!(game_id = %game_id, "User game removed");
        } else {
            debug!(game_id = %game_id, "No user game with this id");
        }
        Ok(removed)
    }
}
