//! Codec Module
//!
//! Converts typed values to and from raw bytes.
//!
//! ## Contract
//! - `encode` is total for every fixed-width type
//! - `decode` of a fixed-width type needs at least that many bytes and
//!   reads the leading ones; shorter input is [`CodecError::TooShort`]
//! - text decoders accept any length, including zero
//! - no codec panics, whatever the input
//!
//! ## Byte Order
//! All numeric codecs are little-endian. The save format carries no
//! endianness tag, so this is fixed for every platform.
//!
//! ## Codecs
//! | Codec | Type | Width |
//! |-------|------|-------|
//! | [`Int16`] [`Int32`] [`Int64`] | `i16` `i32` `i64` | 2 / 4 / 8 |
//! | [`UInt16`] [`UInt32`] [`UInt64`] | `u16` `u32` `u64` | 2 / 4 / 8 |
//! | [`Float32`] [`Float64`] | `f32` `f64` | 4 / 8 |
//! | [`Byte`] | `u8` | 1 |
//! | [`Bool`] | `bool` | 1 (`0x00` / `0xFF`) |
//! | [`Utf8`] [`Utf16Le`] [`Utf16Be`] [`Ascii`] [`Utf32`] [`Utf7`] | `String` | variable |
//! | [`Raw`] | `Vec<u8>` | variable |
//! | [`Bincode`] | any serde type | variable |

mod basic;
mod serde_codec;
mod text;
mod utf7;

pub use basic::{Bool, Byte, Float32, Float64, Int16, Int32, Int64, Raw, UInt16, UInt32, UInt64};
pub use serde_codec::Bincode;
pub use text::{Ascii, Utf16Be, Utf16Le, Utf32, Utf8};
pub use utf7::Utf7;

pub use crate::error::CodecError;

/// Converts a value into bytes
pub trait Encoder<T: ?Sized> {
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError>;
}

/// Converts bytes back into a value
pub trait Decoder<T> {
    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// A matched encoder/decoder pair for one type
pub trait Codec<T>: Encoder<T> + Decoder<T> {}

impl<T, C> Codec<T> for C where C: Encoder<T> + Decoder<T> {}

impl<T: ?Sized, E: Encoder<T> + ?Sized> Encoder<T> for &E {
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        (**self).encode(value)
    }
}

impl<T, D: Decoder<T> + ?Sized> Decoder<T> for &D {
    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        (**self).decode(bytes)
    }
}

/// Fail with `TooShort` unless `bytes` holds at least `width` bytes
pub(crate) fn require_len(bytes: &[u8], width: usize) -> Result<(), CodecError> {
    if bytes.len() < width {
        return Err(CodecError::TooShort {
            expected: width,
            actual: bytes.len(),
        });
    }
    Ok(())
}
