//! Context Store Port - Interface for persisting encoded snapshots.
//!
//! Implementations must replace the stored snapshot atomically: a reader
//! sees either the previous complete buffer or the new one, never a mix.
//! Calls are synchronous because capture runs on paths that cannot wait.

/// Errors that can occur during snapshot storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Port for persisting the latest encoded context snapshot
pub trait ContextStore: Send + Sync {
    /// Replace the stored snapshot
    ///
    /// # Arguments
    /// * `bytes` - The complete encoded snapshot
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails; the previous snapshot
    /// must then still be readable
    fn store(&self, bytes: &[u8]) -> Result<(), StoreError>;

    /// Load the stored snapshot
    ///
    /// # Returns
    /// `None` if no snapshot has been stored
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Discard the stored snapshot
    fn clear(&self) -> Result<(), StoreError>;

    /// Remove and return the stored snapshot in one step
    ///
    /// A snapshot stored after `take` returns is left in place.
    ///
    /// # Errors
    /// Returns `StoreError` if the snapshot could not be read; it stays
    /// stored unless a newer snapshot replaced it meanwhile
    fn take(&self) -> Result<Option<Vec<u8>>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ContextStore) {}

    #[test]
    fn test_store_error_io() {
        let err = StoreError::IoError("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_store_error_poisoned() {
        assert_eq!(StoreError::Poisoned.to_string(), "Store lock poisoned");
    }
}
