//! Container encoder
//!
//! Sizes the buffer in a first pass over the lengths, then appends the
//! count, the table and the payload in one forward pass.

use bytes::BufMut;
use tracing::warn;

use crate::codec::Ascii;

use super::{Entries, COUNT_SIZE, ROW_HEADER_SIZE};

/// Whether a row's lengths fit the table's u32 fields
fn row_fits(key_len: usize, value_len: usize) -> bool {
    u32::try_from(key_len).is_ok() && u32::try_from(value_len).is_ok()
}

/// Entries that [`encode`] writes, in table order
///
/// Rows whose key or value is too long for a u32 length are left out, and
/// so is everything past `u32::MAX` rows.
fn writable(entries: &Entries) -> impl Iterator<Item = (&String, &Vec<u8>)> + '_ {
    entries
        .iter()
        .filter(|(key, value)| row_fits(key.chars().count(), value.len()))
        .take(u32::MAX as usize)
}

/// Exact number of bytes [`encode`] produces for `entries`
pub fn encoded_len(entries: &Entries) -> usize {
    writable(entries).fold(COUNT_SIZE, |acc, (key, value)| {
        acc + ROW_HEADER_SIZE + key.chars().count() + value.len()
    })
}

/// Encode a whole mapping into one container buffer
///
/// Keys are written one byte per character; characters outside ASCII are
/// replaced with `?`. Entries too large for the format are skipped with a
/// warning.
pub fn encode(entries: &Entries) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(entries));

    let count = writable(entries).count();
    if count < entries.len() {
        warn!(
            skipped = entries.len() - count,
            "entries too large for the container format, not written"
        );
    }
    buf.put_u32_le(u32::try_from(count).unwrap_or(u32::MAX));

    // Table (lengths already checked by `row_fits`)
    for (key, value) in writable(entries) {
        let key_bytes = Ascii::to_bytes(key);
        if !key.is_ascii() {
            warn!(key = %key, "non-ASCII key written lossily");
        }
        buf.put_u32_le(value.len() as u32);
        buf.put_u32_le(key_bytes.len() as u32);
        buf.put_slice(&key_bytes);
    }

    // Payload, same order as the table
    for (_, value) in writable(entries) {
        buf.put_slice(value);
    }

    buf
}
