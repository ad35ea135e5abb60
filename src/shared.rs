use std::sync::Arc;
use thiserror::Error;

use crate::collection::{CatalogClient, CollectionService};
use crate::config::AppConfig;
use crate::storage::{GameStore, KeyValueStore};

/// Shared application context containing all dependencies
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<GameStore>,
    pub collection_service: Arc<CollectionService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        key_value_store: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        let store = Arc::new(GameStore::new(key_value_store));
        let collection_service = Arc::new(CollectionService::new(store.clone(), catalog));

        Self {
            config,
            store,
            collection_service,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Reached max retries ({0}) while waiting for the catalog request")]
    RetriesExhausted(u32),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid game: {0}")]
    InvalidGame(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// True for failures of the remote catalog that should degrade to cached or seed data
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(_)
                | AppError::UnexpectedStatus(_)
                | AppError::RetriesExhausted(_)
                | AppError::Parse(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Terminal(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}
