//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```ignore
//! use kv_adapter::prelude::*;
//!
//! let adapter = Adapter::new(MemoryStore::new());
//! adapter.save(Some(&42u32), Some("answer"))?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Adapter and keys
pub use crate::adapter::{Adapter, AdapterError};
pub use crate::key::{KeyStrategy, StorageKey};

// Codecs
pub use crate::codec::{CodecError, JsonCodec, Serializer};

// Stores
pub use crate::store::{KeyValueStore, MemoryStore, StoreError};
#[cfg(feature = "fjall")]
pub use crate::store::FjallStore;

// Configuration
pub use crate::config::AdapterConfig;

// Async facade (requires "async" feature)
#[cfg(feature = "async")]
pub use crate::deferred::Deferred;

// Dependency re-exports
pub use serde::{Deserialize, Serialize};
