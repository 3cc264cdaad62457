//! Container decoder
//!
//! Reads the table into staged rows, then walks the payload in row order.
//! The payload is only touched once the whole table has been read.
//! Every length is checked against the bytes left before it is used, so
//! corrupt lengths never cause an out-of-bounds read or a large allocation.

use bytes::Buf;

use crate::codec::Ascii;

use super::{Entries, COUNT_SIZE, ROW_HEADER_SIZE};

/// What a decode recovered from a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Entry count written in the buffer (0 if the count itself was missing)
    pub rows_declared: u32,

    /// Table rows read completely
    pub rows_read: usize,

    /// Entries present in the output
    pub entries_decoded: usize,

    /// Rows whose key appeared earlier in the same buffer (later one kept)
    pub duplicate_keys: usize,

    /// Whether the buffer ended before everything it declared
    pub truncated: bool,

    /// Bytes left over after the last value
    pub trailing_bytes: usize,
}

impl DecodeStats {
    /// True when every declared entry was recovered
    pub fn is_complete(&self) -> bool {
        !self.truncated && self.rows_read == self.rows_declared as usize
    }
}

/// Decode a container buffer, dropping whatever is unreadable
pub fn decode(bytes: &[u8]) -> Entries {
    decode_with_stats(bytes).0
}

/// Decode a container buffer and report what was recovered
pub fn decode_with_stats(bytes: &[u8]) -> (Entries, DecodeStats) {
    let mut stats = DecodeStats::default();
    let mut entries = Entries::new();
    let mut cursor = bytes;

    if cursor.remaining() < COUNT_SIZE {
        stats.truncated = !bytes.is_empty();
        return (entries, stats);
    }
    let count = cursor.get_u32_le();
    stats.rows_declared = count;

    // Pass 1: table rows
    let capacity = (count as usize).min(cursor.remaining() / ROW_HEADER_SIZE);
    let mut rows: Vec<(String, usize)> = Vec::with_capacity(capacity);
    for _ in 0..count {
        if cursor.remaining() < ROW_HEADER_SIZE {
            stats.truncated = true;
            break;
        }
        let value_len = cursor.get_u32_le() as usize;
        let key_len = cursor.get_u32_le() as usize;

        if cursor.remaining() < key_len {
            stats.truncated = true;
            break;
        }
        let key = Ascii::from_bytes(&cursor[..key_len]);
        cursor.advance(key_len);

        rows.push((key, value_len));
    }
    stats.rows_read = rows.len();

    // The payload starts after the last row, so a short table leaves no
    // value offset known
    if stats.truncated {
        return (entries, stats);
    }

    // Pass 2: payload, sequential in row order
    for (key, value_len) in rows {
        if cursor.remaining() < value_len {
            stats.truncated = true;
            break;
        }
        let value = cursor[..value_len].to_vec();
        cursor.advance(value_len);

        if entries.insert(key, value).is_some() {
            stats.duplicate_keys += 1;
        }
    }

    stats.entries_decoded = entries.len();
    stats.trailing_bytes = cursor.remaining();
    (entries, stats)
}
