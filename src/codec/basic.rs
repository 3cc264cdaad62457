//! Fixed-width codecs
//!
//! Little-endian numerics, single bytes, booleans and raw passthrough.

use bytes::{Buf, BufMut};

use super::{require_len, CodecError, Decoder, Encoder};

macro_rules! le_codec {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $width:expr, $put:ident, $get:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            /// Encoded width in bytes
            pub const WIDTH: usize = $width;
        }

        impl Encoder<$ty> for $name {
            fn encode(&self, value: &$ty) -> Result<Vec<u8>, CodecError> {
                let mut buf = Vec::with_capacity($width);
                buf.$put(*value);
                Ok(buf)
            }
        }

        impl Decoder<$ty> for $name {
            fn decode(&self, bytes: &[u8]) -> Result<$ty, CodecError> {
                require_len(bytes, $width)?;
                let mut cursor = bytes;
                Ok(cursor.$get())
            }
        }
    };
}

le_codec!(
    /// `i16`, 2 bytes little-endian
    Int16, i16, 2, put_i16_le, get_i16_le
);
le_codec!(
    /// `i32`, 4 bytes little-endian
    Int32, i32, 4, put_i32_le, get_i32_le
);
le_codec!(
    /// `i64`, 8 bytes little-endian
    Int64, i64, 8, put_i64_le, get_i64_le
);
le_codec!(
    /// `u16`, 2 bytes little-endian
    UInt16, u16, 2, put_u16_le, get_u16_le
);
le_codec!(
    /// `u32`, 4 bytes little-endian
    UInt32, u32, 4, put_u32_le, get_u32_le
);
le_codec!(
    /// `u64`, 8 bytes little-endian
    UInt64, u64, 8, put_u64_le, get_u64_le
);
le_codec!(
    /// `f32`, IEEE-754 single precision, little-endian
    Float32, f32, 4, put_f32_le, get_f32_le
);
le_codec!(
    /// `f64`, IEEE-754 double precision, little-endian
    Float64, f64, 8, put_f64_le, get_f64_le
);

/// A single `u8`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Byte;

impl Encoder<u8> for Byte {
    fn encode(&self, value: &u8) -> Result<Vec<u8>, CodecError> {
        Ok(vec![*value])
    }
}

impl Decoder<u8> for Byte {
    fn decode(&self, bytes: &[u8]) -> Result<u8, CodecError> {
        require_len(bytes, 1)?;
        Ok(bytes[0])
    }
}

/// `bool` as one byte: `0x00` false, `0xFF` true
///
/// Decoding treats any nonzero byte as true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bool;

impl Bool {
    pub const TRUE: u8 = 0xFF;
    pub const FALSE: u8 = 0x00;
}

impl Encoder<bool> for Bool {
    fn encode(&self, value: &bool) -> Result<Vec<u8>, CodecError> {
        Ok(vec![if *value { Self::TRUE } else { Self::FALSE }])
    }
}

impl Decoder<bool> for Bool {
    fn decode(&self, bytes: &[u8]) -> Result<bool, CodecError> {
        require_len(bytes, 1)?;
        Ok(bytes[0] != Self::FALSE)
    }
}

/// Identity codec for values that are already bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Raw;

impl Encoder<Vec<u8>> for Raw {
    fn encode(&self, value: &Vec<u8>) -> Result<Vec<u8>, CodecError> {
        Ok(value.clone())
    }
}

impl Decoder<Vec<u8>> for Raw {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(bytes.to_vec())
    }
}
