//! Error types for adapter operations.

use thiserror::Error;

use crate::codec::CodecError;
use crate::key::{KeyStrategy, StorageKey};
use crate::store::StoreError;

/// Errors returned by [`Adapter`](super::Adapter) operations.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("No record stored under key: {0}")]
    NotFound(StorageKey),

    #[error("Failed to decode record under key {key}: {source}")]
    Decoding {
        key: StorageKey,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode value for key {key}: {source}")]
    Encoding {
        key: StorageKey,
        #[source]
        source: CodecError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{operation} is not supported with the {strategy} key strategy")]
    Unsupported {
        operation: &'static str,
        strategy: KeyStrategy,
    },

    /// The blocking task behind a deferred operation did not complete.
    #[cfg(feature = "async")]
    #[error("Deferred operation interrupted: {0}")]
    Interrupted(String),
}

impl AdapterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding { .. })
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }

    /// The storage key involved, when the error concerns a single record.
    pub fn key(&self) -> Option<&StorageKey> {
        match self {
            Self::NotFound(key) | Self::Decoding { key, .. } | Self::Encoding { key, .. } => {
                Some(key)
            }
            _ => None,
        }
    }
}
