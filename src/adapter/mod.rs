//! Typed load/save/remove over a [`KeyValueStore`].
//!
//! The adapter turns a request for "the `T` stored under this custom key"
//! into a [`StorageKey`], runs the value through its [`Serializer`], and makes
//! a single call on the store.

mod error;

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{JsonCodec, Serializer};
use crate::key::{KeyStrategy, StorageKey, type_name_of};
use crate::logging::{debug, info, trace};
use crate::store::KeyValueStore;

pub use error::AdapterError;

/// Typed persistence over a flat key-value store.
///
/// The adapter owns nothing but a shared handle to its store, its codec and
/// its key settings, so it is cheap to clone and safe to share as far as the
/// store itself is.
///
/// # Example
///
/// ```ignore
/// use kv_adapter::prelude::*;
///
/// #[derive(Serialize, Deserialize)]
/// struct Session { user_id: u64 }
///
/// let adapter = Adapter::new(MemoryStore::new());
///
/// adapter.save(Some(&Session { user_id: 22 }), None)?;
/// let session: Session = adapter.load(None)?;
///
/// // Stored under "current-session" instead of "KvAdapter.Session"
/// adapter.save(Some(&session), Some("current-session"))?;
///
/// adapter.remove::<Session>(None)?;
/// assert!(adapter.load_if_present::<Session>(None).is_none());
/// ```
pub struct Adapter<S: ?Sized, C = JsonCodec> {
    store: Arc<S>,
    codec: C,
    strategy: KeyStrategy,
    name: Option<Cow<'static, str>>,
}

impl<S: ?Sized, C: Clone> Clone for Adapter<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            codec: self.codec.clone(),
            strategy: self.strategy,
            name: self.name.clone(),
        }
    }
}

impl<S: KeyValueStore> Adapter<S, JsonCodec> {
    /// Create an adapter owning `store`, with the current key strategy.
    pub fn new(store: S) -> Self {
        Self::shared(Arc::new(store))
    }
}

impl<S: KeyValueStore + ?Sized> Adapter<S, JsonCodec> {
    /// Create an adapter over a shared store, with the current key strategy.
    pub fn shared(store: Arc<S>) -> Self {
        Self {
            store,
            codec: JsonCodec,
            strategy: KeyStrategy::Current,
            name: None,
        }
    }

    /// Create an adapter over a shared store, with the legacy key strategy.
    pub fn legacy(store: Arc<S>) -> Self {
        Self::shared(store).with_strategy(KeyStrategy::Legacy)
    }
}

impl<S: KeyValueStore + ?Sized, C: Serializer> Adapter<S, C> {
    pub fn with_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the adapter name used as the first key component.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the codec, keeping store and key settings.
    pub fn with_codec<C2: Serializer>(self, codec: C2) -> Adapter<S, C2> {
        Adapter {
            store: self.store,
            codec,
            strategy: self.strategy,
            name: self.name,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    /// The adapter name: explicit if set, else the strategy's default.
    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.strategy.default_adapter_name())
    }

    /// The key under which a `T` with this custom key is stored.
    pub fn storage_key<T: ?Sized>(&self, custom_key: Option<&str>) -> StorageKey {
        self.strategy
            .storage_key(self.name(), &type_name_of::<T>(), custom_key)
    }

    /// Load the `T` stored under the derived key.
    ///
    /// Fails with [`AdapterError::NotFound`] when no record exists and with
    /// [`AdapterError::Decoding`] when the stored bytes are not a valid `T`.
    pub fn load<T: DeserializeOwned>(&self, custom_key: Option<&str>) -> Result<T, AdapterError> {
        let key = self.storage_key::<T>(custom_key);
        trace!(key = %key, "loading record");

        let Some(bytes) = self.store.get(key.as_str())? else {
            return Err(AdapterError::NotFound(key));
        };

        match self.codec.decode(&bytes) {
            Ok(value) => Ok(value),
            Err(source) => Err(AdapterError::Decoding { key, source }),
        }
    }

    /// Like [`load`](Self::load), but any failure yields `None`.
    ///
    /// A record that exists but no longer decodes as `T` is reported the same
    /// way as a missing one. Use [`load`](Self::load) to tell them apart.
    pub fn load_if_present<T: DeserializeOwned>(&self, custom_key: Option<&str>) -> Option<T> {
        self.load(custom_key).ok()
    }

    /// Type-inferring variant of [`load`](Self::load).
    #[deprecated(note = "use `load::<T>` with an explicit type instead")]
    pub fn load_inferred<T: DeserializeOwned>(
        &self,
        custom_key: Option<&str>,
    ) -> Result<T, AdapterError> {
        self.load::<T>(custom_key)
    }

    /// Store `value`, overwriting any existing record. `None` removes it.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        value: Option<&T>,
        custom_key: Option<&str>,
    ) -> Result<(), AdapterError> {
        let Some(value) = value else {
            return self.remove::<T>(custom_key);
        };

        let key = self.storage_key::<T>(custom_key);
        let bytes = match self.codec.encode(value) {
            Ok(bytes) => bytes,
            Err(source) => return Err(AdapterError::Encoding { key, source }),
        };

        debug!(key = %key, bytes = bytes.len(), "saving record");
        self.store.set(key.as_str(), &bytes)?;
        Ok(())
    }

    /// Delete the record for `T`. Succeeds when nothing is stored.
    pub fn remove<T: ?Sized>(&self, custom_key: Option<&str>) -> Result<(), AdapterError> {
        let key = self.storage_key::<T>(custom_key);
        debug!(key = %key, "removing record");
        self.store.remove(key.as_str())?;
        Ok(())
    }

    /// Delete every stored key containing `T`'s type name, returning how many
    /// were removed.
    ///
    /// Matching is by substring over *all* keys in the store, so removing
    /// `User` also removes `KvAdapter.UserProfile` and any custom key that
    /// happens to contain `User`. Records saved for `T` under custom keys that
    /// do not contain the name are left in place.
    ///
    /// Only available with [`KeyStrategy::Current`].
    pub fn remove_all<T: ?Sized>(&self) -> Result<usize, AdapterError> {
        if !self.strategy.supports_remove_all() {
            return Err(AdapterError::Unsupported {
                operation: "remove_all",
                strategy: self.strategy,
            });
        }

        let type_name = type_name_of::<T>();
        let mut removed = 0;

        for key in self.store.all_keys()? {
            if key.contains(type_name.as_str()) {
                trace!(key = %key, "removing matching record");
                self.store.remove(&key)?;
                removed += 1;
            }
        }

        info!(type_name = %type_name, removed = removed, "removed all records of type");
        Ok(removed)
    }
}

#[cfg(feature = "fjall")]
mod standard {
    use super::*;
    use crate::config::AdapterConfig;
    use crate::store::{FjallStore, StoreError};

    impl Adapter<FjallStore, JsonCodec> {
        /// Adapter over the process-wide standard store.
        ///
        /// See [`FjallStore::standard`] for where that store lives.
        pub fn standard() -> Result<Self, StoreError> {
            Ok(Self::shared(FjallStore::standard()?))
        }

        /// Open the configured store and apply the configured key settings.
        pub fn from_config(config: &AdapterConfig) -> Result<Self, StoreError> {
            let store = FjallStore::open_suite(&config.store.path, &config.store.suite)?;
            let adapter = Self::new(store).with_strategy(config.adapter.strategy);

            Ok(match &config.adapter.name {
                Some(name) => adapter.with_name(name.clone()),
                None => adapter,
            })
        }
    }
}
