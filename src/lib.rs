// Library crate for the board game picker
// This file exposes the public API for the binary and integration tests

pub mod collection;
pub mod config;
pub mod console;
pub mod filter;
pub mod flow;
pub mod shared;
pub mod spinner;
pub mod storage;
pub mod vote;

// Re-export commonly used types for easier access in tests
pub use collection::{BggClient, CatalogClient, CollectionService, Game, GameLength};
pub use config::AppConfig;
pub use console::{Console, LineSource};
pub use filter::{filter_games, FilterCriteria};
pub use flow::{PickerFlow, Screen};
pub use shared::{AppContext, AppError};
pub use spinner::{Draw, SpinSession};
pub use storage::{FileKeyValueStore, GameStore, InMemoryKeyValueStore, KeyValueStore};
pub use vote::{VoteDelta, VoteLedger, VoteOutcome};
