//! Flat string-keyed byte stores the adapter persists into.
//!
//! The adapter only needs four operations from a store: point get, set and
//! remove by key, plus enumeration of every key. No ordering, atomicity
//! across keys, or transactions are assumed.

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

#[cfg(feature = "fjall")]
mod fjall_store;
mod memory;

#[cfg(feature = "fjall")]
pub use fjall_store::FjallStore;
pub use memory::MemoryStore;

/// Errors raised by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "fjall")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Invalid suite name: {0:?}")]
    InvalidSuite(String),

    /// Failure reported by a store implemented outside this crate.
    #[error("Store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// A durable (or in-process) map from string keys to byte payloads.
pub trait KeyValueStore {
    /// Read the payload stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any existing payload.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete the payload under `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Every key currently present.
    fn all_keys(&self) -> Result<BTreeSet<String>, StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn all_keys(&self) -> Result<BTreeSet<String>, StoreError> {
        (**self).all_keys()
    }
}
