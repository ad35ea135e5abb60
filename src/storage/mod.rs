// Local persistence: a string key-value port plus typed access on top of it.

// Public API - what other modules can use
pub use game_store::GameStore;
pub use repository::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

// Internal modules
pub mod game_store;
mod repository;
