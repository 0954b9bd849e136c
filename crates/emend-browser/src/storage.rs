//! Browser-side `ContentStore` implementations.
//!
//! `LocalStore` keeps content in the browser's local storage so edits
//! survive reloads. Off the wasm target it delegates to a process-wide
//! in-memory store, keeping the same code paths testable natively.

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(not(target_arch = "wasm32"))]
use std::sync::{Arc, LazyLock};

#[cfg(not(target_arch = "wasm32"))]
use emend_core::MemoryStore;
use emend_core::store::{LoadResponse, parse_stored_payload};
use emend_core::{ContentSnapshot, ContentStore, StorageStrategy, StoreError};

/// Local-storage key for saved page content.
pub const CONTENT_KEY: &str = "emend-page-content";

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl ContentStore for LocalStore {
    fn load(&self) -> impl Future<Output = Result<Option<ContentSnapshot>, StoreError>> {
        async move {
            match LocalStorage::get::<ContentSnapshot>(CONTENT_KEY) {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
                Err(e) => Err(StoreError::Load(format!("local storage: {e}"))),
            }
        }
    }

    fn store(&self, snapshot: &ContentSnapshot) -> impl Future<Output = Result<(), StoreError>> {
        let result = LocalStorage::set(CONTENT_KEY, snapshot)
            .map_err(|e| StoreError::Store(format!("local storage: {e}")));
        async move { result }
    }
}

#[cfg(not(target_arch = "wasm32"))]
static MEM_STORE: LazyLock<Arc<MemoryStore>> = LazyLock::new(|| Arc::new(MemoryStore::new()));

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct LocalStore(Arc<MemoryStore>);

#[cfg(not(target_arch = "wasm32"))]
impl LocalStore {
    pub fn new() -> Self {
        Self(MEM_STORE.clone())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ContentStore for LocalStore {
    fn load(&self) -> impl Future<Output = Result<Option<ContentSnapshot>, StoreError>> {
        self.0.load()
    }

    fn store(&self, snapshot: &ContentSnapshot) -> impl Future<Output = Result<(), StoreError>> {
        self.0.store(snapshot)
    }
}

/// Persists content against the page's backing service.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    load_url: String,
    store_url: String,
}

impl RemoteStore {
    pub fn new(load_url: impl Into<String>, store_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            load_url: load_url.into(),
            store_url: store_url.into(),
        }
    }
}

impl ContentStore for RemoteStore {
    fn load(&self) -> impl Future<Output = Result<Option<ContentSnapshot>, StoreError>> {
        let request = self.client.get(&self.load_url);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| StoreError::Load(e.to_string()))?
                .error_for_status()
                .map_err(|e| StoreError::Load(e.to_string()))?;
            let body: LoadResponse = response
                .json()
                .await
                .map_err(|e| StoreError::Load(e.to_string()))?;
            if body.data.is_empty() {
                return Ok(None);
            }
            Ok(Some(parse_stored_payload(&body.data)))
        }
    }

    fn store(&self, snapshot: &ContentSnapshot) -> impl Future<Output = Result<(), StoreError>> {
        let request = self.client.post(&self.store_url).json(snapshot);
        async move {
            request
                .send()
                .await
                .map_err(|e| StoreError::Store(e.to_string()))?
                .error_for_status()
                .map_err(|e| StoreError::Store(e.to_string()))?;
            Ok(())
        }
    }
}

/// Store selected by the configured [`StorageStrategy`].
#[derive(Debug, Clone)]
pub enum StrategyStore {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl StrategyStore {
    pub fn from_strategy(strategy: &StorageStrategy) -> Self {
        match strategy {
            StorageStrategy::LocalAutosave { .. } => Self::Local(LocalStore::new()),
            StorageStrategy::Remote {
                load_url,
                store_url,
            } => Self::Remote(RemoteStore::new(load_url.clone(), store_url.clone())),
        }
    }
}

impl ContentStore for StrategyStore {
    fn load(&self) -> impl Future<Output = Result<Option<ContentSnapshot>, StoreError>> {
        async move {
            match self {
                Self::Local(store) => store.load().await,
                Self::Remote(store) => store.load().await,
            }
        }
    }

    fn store(&self, snapshot: &ContentSnapshot) -> impl Future<Output = Result<(), StoreError>> {
        async move {
            match self {
                Self::Local(store) => store.store(snapshot).await,
                Self::Remote(store) => store.store(snapshot).await,
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_store_shares_process_memory() {
        let writer = LocalStore::new();
        let reader = LocalStore::new();

        let snapshot = ContentSnapshot::new("<p>kept</p>", "p { margin: 0; }");
        writer.store(&snapshot).await.unwrap();
        assert_eq!(reader.load().await.unwrap(), Some(snapshot));
    }

    #[test]
    fn test_strategy_store_selection() {
        let local = StrategyStore::from_strategy(&StorageStrategy::default());
        assert!(matches!(local, StrategyStore::Local(_)));

        let remote = StrategyStore::from_strategy(&StorageStrategy::remote_defaults());
        assert!(matches!(remote, StrategyStore::Remote(_)));
    }
}
