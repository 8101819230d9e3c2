//! Typed key-value persistence over flat string-keyed stores.
//!
//! An [`Adapter`] saves and loads any `serde` value in a [`KeyValueStore`],
//! deriving the storage key from the value's type name and an optional
//! custom key.
//!
//! # Quick Start
//!
//! ```ignore
//! use kv_adapter::prelude::*;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Settings { volume: u8 }
//!
//! let adapter = Adapter::new(FjallStore::open(".kv-adapter")?);
//!
//! adapter.save(Some(&Settings { volume: 7 }), None)?;
//! let settings: Settings = adapter.load(None)?;
//! ```
//!
//! # Modules
//!
//! - [`adapter`] - The adapter and its operations
//! - [`key`] - Storage key derivation and the legacy/current key strategies
//! - [`codec`] - Value serialization
//! - [`store`] - The store trait plus in-memory and fjall-backed stores
//! - [`config`] - TOML configuration
//! - [`deferred`] - Single-shot async facade (requires `async` feature)
//! - [`subscriber`] - Tracing subscriber setup (requires `subscriber` feature)
//!
//! # Feature Flags
//!
//! - `fjall` - Enable the durable fjall store (enabled by default)
//! - `async` - Enable the tokio-based deferred operations
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `subscriber` - Enable subscriber initialisation from configuration
//! - `full` - Enable all features

pub mod adapter;
pub mod codec;
pub mod config;
#[cfg(feature = "async")]
pub mod deferred;
pub mod key;
mod logging;
pub mod prelude;
pub mod store;
#[cfg(feature = "subscriber")]
pub mod subscriber;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

pub use adapter::{Adapter, AdapterError};
pub use codec::{CodecError, JsonCodec, Serializer};
pub use config::{AdapterConfig, ConfigError};
pub use key::{KeyStrategy, StorageKey, type_name_of};
pub use store::{KeyValueStore, MemoryStore, StoreError};

#[cfg(feature = "fjall")]
pub use store::FjallStore;

#[cfg(feature = "async")]
pub use deferred::Deferred;
