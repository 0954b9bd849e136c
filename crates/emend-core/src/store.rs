//! Content persistence seam.
//!
//! Trait methods return `impl Future`, so browser implementations can run
//! requests without boxing while native ones resolve immediately.

use std::sync::Mutex;

use serde::Deserialize;

use crate::error::StoreError;
use crate::types::ContentSnapshot;

/// Wire shape of a remote load: the endpoint wraps the stored payload in a
/// `data` field.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadResponse {
    pub data: String,
}

/// Where edited content goes when the session saves.
pub trait ContentStore {
    /// Fetch the previously stored snapshot, if any.
    fn load(&self) -> impl Future<Output = Result<Option<ContentSnapshot>, StoreError>>;

    /// Persist a snapshot.
    fn store(&self, snapshot: &ContentSnapshot) -> impl Future<Output = Result<(), StoreError>>;
}

/// Decode a stored payload string into a snapshot.
///
/// Payloads written by this panel are snapshot JSON. Anything that fails to
/// parse is treated as bare markup from an earlier writer, with no styles.
pub fn parse_stored_payload(data: &str) -> ContentSnapshot {
    serde_json::from_str(data).unwrap_or_else(|_| ContentSnapshot {
        html: data.to_owned(),
        css: String::new(),
    })
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<ContentSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ContentSnapshot>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ContentStore for MemoryStore {
    fn load(&self) -> impl Future<Output = Result<Option<ContentSnapshot>, StoreError>> {
        let snapshot = self.lock().clone();
        async move { Ok(snapshot) }
    }

    fn store(&self, snapshot: &ContentSnapshot) -> impl Future<Output = Result<(), StoreError>> {
        *self.lock() = Some(snapshot.clone());
        async move { Ok(()) }
    }
}
