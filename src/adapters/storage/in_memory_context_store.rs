//! In-Memory Context Store Adapter
//!
//! Keeps the latest snapshot in memory.
//! Useful for testing and for embedders that persist elsewhere.

use std::sync::{Arc, RwLock};

use crate::ports::{ContextStore, StoreError};

/// In-memory storage for the context snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemoryContextStore {
    snapshot: Arc<RwLock<Option<Vec<u8>>>>,
    writes: Arc<RwLock<usize>>,
}

impl InMemoryContextStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `bytes` (useful for tests)
    pub fn with_snapshot(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        if let Ok(mut snapshot) = store.snapshot.write() {
            *snapshot = Some(bytes.into());
        }
        store
    }

    /// Get the number of completed writes
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|count| *count).unwrap_or(0)
    }
}

impl ContextStore for InMemoryContextStore {
    fn store(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let mut snapshot = self.snapshot.write().map_err(|_| StoreError::Poisoned)?;
        *snapshot = Some(bytes.to_vec());
        let mut writes = self.writes.write().map_err(|_| StoreError::Poisoned)?;
        *writes += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let snapshot = self.snapshot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(snapshot.clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut snapshot = self.snapshot.write().map_err(|_| StoreError::Poisoned)?;
        *snapshot = None;
        Ok(())
    }

    fn take(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let mut snapshot = self.snapshot.write().map_err(|_| StoreError::Poisoned)?;
        Ok(snapshot.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_starts_empty() {
        let store = InMemoryContextStore::new();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_in_memory_store_replaces() {
        let store = InMemoryContextStore::new();
        store.store(b"a").unwrap();
        store.store(b"b").unwrap();

        assert_eq!(store.load().unwrap(), Some(b"b".to_vec()));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_in_memory_store_take_empties_store() {
        let store = InMemoryContextStore::with_snapshot("x");

        assert_eq!(store.take().unwrap(), Some(b"x".to_vec()));
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.take().unwrap(), None);
    }

    #[test]
    fn test_in_memory_store_clones_share_state() {
        let store = InMemoryContextStore::with_snapshot("x");
        let other = store.clone();
        other.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
