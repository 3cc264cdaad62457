//! UTF-7 text codec (RFC 2152)
//!
//! Legacy 7-bit transform: characters from the direct set are written as
//! themselves, everything else as `+`, modified base64 of the UTF-16BE code
//! units, then `-`. A literal `+` is written `+-`.
//!
//! Only the mandatory direct set is written directly. The decoder accepts
//! any printable ASCII outside a shifted run and an omitted trailing `-`.

use super::{CodecError, Decoder, Encoder};

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// UTF-7 text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf7;

fn is_direct(c: char) -> bool {
    c.is_ascii_alphanumeric() || "'(),-./:? \t\r\n".contains(c)
}

fn base64_value(b: u8) -> Option<u32> {
    match b {
        b'A'..=b'Z' => Some((b - b'A') as u32),
        b'a'..=b'z' => Some((b - b'a') as u32 + 26),
        b'0'..=b'9' => Some((b - b'0') as u32 + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Accumulates 16-bit units and emits 6-bit base64 digits
#[derive(Default)]
struct Shift {
    bits: u32,
    nbits: u32,
}

impl Shift {
    fn push_unit(&mut self, unit: u16, out: &mut Vec<u8>) {
        self.bits = (self.bits << 16) | unit as u32;
        self.nbits += 16;
        while self.nbits >= 6 {
            self.nbits -= 6;
            let digit = (self.bits >> self.nbits) & 0x3F;
            out.push(BASE64[digit as usize]);
        }
        self.bits &= (1 << self.nbits) - 1;
    }

    /// Flush leftover bits zero-padded, then close the run
    fn finish(self, out: &mut Vec<u8>) {
        if self.nbits > 0 {
            let digit = (self.bits << (6 - self.nbits)) & 0x3F;
            out.push(BASE64[digit as usize]);
        }
        out.push(b'-');
    }
}

impl Encoder<str> for Utf7 {
    fn encode(&self, value: &str) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(value.len());
        let mut shift: Option<Shift> = None;

        for c in value.chars() {
            if is_direct(c) || c == '+' {
                if let Some(run) = shift.take() {
                    run.finish(&mut out);
                }
                if c == '+' {
                    out.extend_from_slice(b"+-");
                } else {
                    out.push(c as u8);
                }
                continue;
            }

            let run = shift.get_or_insert_with(|| {
                out.push(b'+');
                Shift::default()
            });
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                run.push_unit(*unit, &mut out);
            }
        }
        if let Some(run) = shift.take() {
            run.finish(&mut out);
        }
        Ok(out)
    }
}

impl Encoder<String> for Utf7 {
    fn encode(&self, value: &String) -> Result<Vec<u8>, CodecError> {
        <Self as Encoder<str>>::encode(self, value.as_str())
    }
}

impl Decoder<String> for Utf7 {
    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if !b.is_ascii() {
                return Err(CodecError::InvalidText {
                    encoding: "UTF-7",
                    reason: format!("non-ASCII byte 0x{:02x} at {}", b, i),
                });
            }
            i += 1;
            if b != b'+' {
                units.push(b as u16);
                continue;
            }
            if bytes.get(i) == Some(&b'-') {
                units.push(b'+' as u16);
                i += 1;
                continue;
            }

            let mut bits: u32 = 0;
            let mut nbits: u32 = 0;
            while let Some(value) = bytes.get(i).and_then(|&d| base64_value(d)) {
                bits = (bits << 6) | value;
                nbits += 6;
                if nbits >= 16 {
                    nbits -= 16;
                    units.push((bits >> nbits) as u16);
                    bits &= (1 << nbits) - 1;
                }
                i += 1;
            }
            if bytes.get(i) == Some(&b'-') {
                i += 1;
            }
        }
        String::from_utf16(&units).map_err(|e| CodecError::InvalidText {
            encoding: "UTF-7",
            reason: e.to_string(),
        })
    }
}
