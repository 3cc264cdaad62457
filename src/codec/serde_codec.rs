//! Serde-backed codec
//!
//! Stores any `Serialize + DeserializeOwned` type using bincode.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CodecError, Decoder, Encoder};

/// bincode codec for structured values
///
/// ```
/// use binsave::codec::{Bincode, Decoder, Encoder};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Player {
///     name: String,
///     level: u32,
/// }
///
/// let codec = Bincode::<Player>::new();
/// let player = Player { name: "ada".into(), level: 7 };
/// let bytes = codec.encode(&player).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap(), player);
/// ```
pub struct Bincode<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Bincode<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Bincode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Bincode<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Bincode<T> {}

impl<T> fmt::Debug for Bincode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bincode<{}>", std::any::type_name::<T>())
    }
}

impl<T: Serialize> Encoder<T> for Bincode<T> {
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(value).map_err(|e| CodecError::Serialization(e.to_string()))
    }
}

impl<T: DeserializeOwned> Decoder<T> for Bincode<T> {
    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Serialization(e.to_string()))
    }
}
