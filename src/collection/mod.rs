// Collection source: catalog client, bundled seed games and the service that
// merges them with user-added games.

// Public API - what other modules can use
pub use catalog::{parse_collection_xml, BggClient, CatalogClient};
pub use models::{Collection, Complexity, Game, GameDraft, GameLength};
pub use service::{
    CollectionOrigin, CollectionService, FetchedCollection, PendingSnapshot, RefreshOutcome,
};

// Internal modules
mod catalog;
pub mod models;
pub mod seed;
mod service;
