//! Conversion between typed values and stored bytes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod finite;

/// Errors produced while encoding or decoding a record.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot encode non-finite float {0}")]
    NonFiniteFloat(f64),

    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for CodecError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl CodecError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Type-safe conversion between a value and its stored byte form.
///
/// Implementations must round-trip every value their format can express:
/// `decode::<T>(&encode(&v)?)? == v`.
pub trait Serializer {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// Compact JSON encoding via `serde_json`. The default codec.
///
/// Floats are written in shortest round-trip form and read back bit-exact.
/// NaN and infinities have no JSON form and fail to encode.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl Serializer for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let bytes = serde_json::to_vec(value)?;
        finite::check(value)?;
        Ok(bytes)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
