use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

use whatshouldweplay::{
    AppError, CatalogClient, Game, InMemoryKeyValueStore, KeyValueStore, LineSource,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Catalog that replays queued responses in order and records every identity asked for.
/// Once the queue is empty every fetch fails with a 404.
#[derive(Clone)]
pub struct ScriptedCatalogClient {
    responses: Arc<RwLock<VecDeque<Result<Vec<Game>, u16>>>>,
    calls: Arc<RwLock<Vec<String>>>,
    delay: Duration,
}

impl ScriptedCatalogClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(VecDeque::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Every fetch takes this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn push_games(&self, games: Vec<Game>) {
        self.responses.write().await.push_back(Ok(games));
    }

    pub async fn push_status(&self, status: u16) {
        self.responses.write().await.push_back(Err(status));
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl CatalogClient for ScriptedCatalogClient {
    async fn fetch_collection(&self, identity: &str) -> Result<Vec<Game>, AppError> {
        self.calls.write().await.push(identity.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.responses.write().await.pop_front() {
            Some(Ok(games)) => Ok(games),
            Some(Err(status)) => Err(AppError::UnexpectedStatus(status)),
            None => Err(AppError::UnexpectedStatus(404)),
        }
    }
}

/// In-memory store whose writes each take a while to land
pub struct SlowKeyValueStore {
    inner: InMemoryKeyValueStore,
    write_delay: Duration,
}

impl SlowKeyValueStore {
    pub fn new(write_delay: Duration) -> Self {
        Self {
            inner: InMemoryKeyValueStore::new(),
            write_delay,
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        tokio::time::sleep(self.write_delay).await;
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        tokio::time::sleep(self.write_delay).await;
        self.inner.remove_item(key).await
    }
}

/// Console input fed from a fixed list of lines
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[async_trait]
impl LineSource for ScriptedInput {
    async fn next_line(&mut self) -> Result<Option<String>, AppError> {
        Ok(self.lines.pop_front())
    }
}

/// Console output captured in memory
#[derive(Clone, Default)]
pub struct SharedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
