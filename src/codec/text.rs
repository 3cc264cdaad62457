//! Text codecs
//!
//! One codec per text encoding. None of them write a byte order mark.

use bytes::{Buf, BufMut};

use super::{CodecError, Decoder, Encoder};

/// Substitute for characters ASCII cannot represent
pub const ASCII_REPLACEMENT: u8 = b'?';

/// Implements `Encoder<String>` by delegating to `Encoder<str>`
macro_rules! string_encoder {
    ($name:ident) => {
        impl Encoder<String> for $name {
            fn encode(&self, value: &String) -> Result<Vec<u8>, CodecError> {
                <Self as Encoder<str>>::encode(self, value.as_str())
            }
        }
    };
}

fn invalid(encoding: &'static str, reason: impl Into<String>) -> CodecError {
    CodecError::InvalidText {
        encoding,
        reason: reason.into(),
    }
}

// =============================================================================
// UTF-8
// =============================================================================

/// UTF-8 text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

impl Encoder<str> for Utf8 {
    fn encode(&self, value: &str) -> Result<Vec<u8>, CodecError> {
        Ok(value.as_bytes().to_vec())
    }
}
string_encoder!(Utf8);

impl Decoder<String> for Utf8 {
    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| invalid("UTF-8", e.to_string()))
    }
}

// =============================================================================
// UTF-16
// =============================================================================

/// UTF-16 little-endian text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf16Le;

/// UTF-16 big-endian text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf16Be;

impl Encoder<str> for Utf16Le {
    fn encode(&self, value: &str) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(value.len() * 2);
        for unit in value.encode_utf16() {
            buf.put_u16_le(unit);
        }
        Ok(buf)
    }
}
string_encoder!(Utf16Le);

impl Decoder<String> for Utf16Le {
    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        decode_utf16(bytes, "UTF-16LE", |cursor| cursor.get_u16_le())
    }
}

impl Encoder<str> for Utf16Be {
    fn encode(&self, value: &str) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(value.len() * 2);
        for unit in value.encode_utf16() {
            buf.put_u16(unit);
        }
        Ok(buf)
    }
}
string_encoder!(Utf16Be);

impl Decoder<String> for Utf16Be {
    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        decode_utf16(bytes, "UTF-16BE", |cursor| cursor.get_u16())
    }
}

fn decode_utf16(
    bytes: &[u8],
    encoding: &'static str,
    read_unit: impl Fn(&mut &[u8]) -> u16,
) -> Result<String, CodecError> {
    if bytes.len() % 2 != 0 {
        return Err(invalid(encoding, format!("odd byte length {}", bytes.len())));
    }
    let mut cursor = bytes;
    let mut units = Vec::with_capacity(bytes.len() / 2);
    while cursor.has_remaining() {
        units.push(read_unit(&mut cursor));
    }
    String::from_utf16(&units).map_err(|e| invalid(encoding, e.to_string()))
}

// =============================================================================
// UTF-32
// =============================================================================

/// UTF-32 little-endian text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf32;

impl Encoder<str> for Utf32 {
    fn encode(&self, value: &str) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(value.len() * 4);
        for c in value.chars() {
            buf.put_u32_le(c as u32);
        }
        Ok(buf)
    }
}
string_encoder!(Utf32);

impl Decoder<String> for Utf32 {
    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        if bytes.len() % 4 != 0 {
            return Err(invalid(
                "UTF-32",
                format!("length {} is not a multiple of 4", bytes.len()),
            ));
        }
        let mut cursor = bytes;
        let mut out = String::with_capacity(bytes.len() / 4);
        while cursor.has_remaining() {
            let scalar = cursor.get_u32_le();
            let c = char::from_u32(scalar)
                .ok_or_else(|| invalid("UTF-32", format!("invalid scalar 0x{:08x}", scalar)))?;
            out.push(c);
        }
        Ok(out)
    }
}

// =============================================================================
// ASCII
// =============================================================================

/// 7-bit ASCII, one byte per character
///
/// Lossy in both directions: characters outside ASCII encode as `?` and
/// bytes above 0x7F decode as `?`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascii;

impl Ascii {
    /// Infallible encode, also used for container keys
    pub fn to_bytes(value: &str) -> Vec<u8> {
        value
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { ASCII_REPLACEMENT })
            .collect()
    }

    /// Infallible decode, also used for container keys
    pub fn from_bytes(bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { ASCII_REPLACEMENT as char })
            .collect()
    }
}

impl Encoder<str> for Ascii {
    fn encode(&self, value: &str) -> Result<Vec<u8>, CodecError> {
        Ok(Self::to_bytes(value))
    }
}
string_encoder!(Ascii);

impl Decoder<String> for Ascii {
    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        Ok(Self::from_bytes(bytes))
    }
}
