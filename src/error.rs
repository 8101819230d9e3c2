//! Unified error type for the kv-adapter library.
//!
//! This module provides a single [`Error`] type that encompasses all errors
//! that can occur in the library, for application code that opens stores,
//! reads configuration and runs adapter operations in one place.

use thiserror::Error;

use crate::adapter::AdapterError;
use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::store::StoreError;
#[cfg(feature = "subscriber")]
use crate::subscriber::LoggingError;

/// Unified error type for all kv-adapter operations.
///
/// # Example
///
/// ```ignore
/// use kv_adapter::{Adapter, AdapterConfig, Result};
///
/// fn last_session() -> Result<Option<Session>> {
///     let config = AdapterConfig::from_file("adapter.toml")?;
///     let adapter = Adapter::from_config(&config)?;
///     Ok(adapter.load_if_present(None))
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an adapter operation.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Error from a store backend.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error from a codec used directly.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Error loading configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error installing the tracing subscriber.
    #[cfg(feature = "subscriber")]
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if no record existed under the requested key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Adapter(e) if e.is_not_found())
    }

    /// Returns `true` if this is a store backend error, wrapped or not.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Adapter(AdapterError::Store(_)))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
