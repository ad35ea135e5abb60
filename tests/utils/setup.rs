use futures::FutureExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use whatshouldweplay::{
    console::{no_interrupt, Interrupt},
    spinner::ScriptedDraw,
    AppConfig, AppContext, FileKeyValueStore, Game, InMemoryKeyValueStore, KeyValueStore,
};

use super::mocks::{ScriptedCatalogClient, SharedOutput, SlowKeyValueStore};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub context: AppContext,
    pub catalog: ScriptedCatalogClient,
    pub output: SharedOutput,
    pub draw_indices: Vec<usize>,
    pub interrupt_after: Option<Duration>,
}

impl TestSetup {
    pub fn interrupt(&self) -> Interrupt {
        match self.interrupt_after {
            Some(delay) if delay.is_zero() => Box::new(|| async {}.boxed()),
            Some(delay) => Box::new(move || tokio::time::sleep(delay).boxed()),
            None => no_interrupt(),
        }
    }

    pub fn draw(&self) -> ScriptedDraw {
        ScriptedDraw::new(self.draw_indices.clone())
    }
}

pub struct TestSetupBuilder {
    config: AppConfig,
    cached_collection: Option<Vec<Game>>,
    identity: Option<String>,
    store_file: Option<PathBuf>,
    draw_indices: Vec<usize>,
    interrupt_after: Option<Duration>,
    catalog_delay: Duration,
    write_delay: Option<Duration>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.flow.splash_delay_ms = 0;
        config.spinner.duration_ms = 10;
        config.spinner.frame_interval_ms = 2;
        config.catalog.retry_delay_ms = 0;

        Self {
            config,
            cached_collection: None,
            identity: None,
            store_file: None,
            draw_indices: vec![0],
            interrupt_after: None,
            catalog_delay: Duration::ZERO,
            write_delay: None,
        }
    }

    /// Start with a snapshot already saved, as after an earlier successful fetch
    pub fn with_cached_collection(mut self, games: Vec<Game>) -> Self {
        self.cached_collection = Some(games);
        self
    }

    pub fn with_identity(mut self, identity: &str) -> Self {
        self.identity = Some(identity.to_string());
        self
    }

    pub fn with_store_file(mut self, path: PathBuf) -> Self {
        self.store_file = Some(path);
        self
    }

    pub fn with_draws(mut self, indices: Vec<usize>) -> Self {
        self.draw_indices = indices;
        self
    }

    /// Every fetch and spin is interrupted as soon as it starts
    pub fn interrupting(mut self) -> Self {
        self.interrupt_after = Some(Duration::ZERO);
        self
    }

    /// Every fetch and spin is interrupted once it has run for `delay`
    pub fn interrupting_after(mut self, delay: Duration) -> Self {
        self.interrupt_after = Some(delay);
        self
    }

    pub fn with_slow_catalog(mut self, delay: Duration) -> Self {
        self.catalog_delay = delay;
        self
    }

    /// Each store write takes `delay`; cannot be combined with a store file
    pub fn with_slow_writes(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    pub async fn build(self) -> TestSetup {
        let key_value_store: Arc<dyn KeyValueStore> = match (self.store_file, self.write_delay) {
            (Some(path), _) => Arc::new(FileKeyValueStore::new(path)),
            (None, Some(delay)) => Arc::new(SlowKeyValueStore::new(delay)),
            (None, None) => Arc::new(InMemoryKeyValueStore::new()),
        };
        let catalog = ScriptedCatalogClient::new().with_delay(self.catalog_delay);
        let context = AppContext::new(self.config, key_value_store, Arc::new(catalog.clone()));

        if let Some(games) = &self.cached_collection {
            context.store.save_collection_snapshot(games).await.unwrap();
        }
        if let Some(identity) = &self.identity {
            context.store.save_configured_identity(identity).await.unwrap();
        }

        TestSetup {
            context,
            catalog,
            output: SharedOutput::default(),
            draw_indices: self.draw_indices,
            interrupt_after: self.interrupt_after,
        }
    }
}
