//! Container Module
//!
//! Packs a whole key → bytes mapping into one flat buffer and back.
//!
//! ## Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Count (4)                     entry count N, LE u32     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Table (N rows)                                          │
//! │   [ValLen: u32][KeyLen: u32][Key (ASCII)]               │
//! │   ... repeated for each entry ...                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Payload                                                 │
//! │   [Value 0][Value 1] ... [Value N-1]                    │
//! │   (same order as the table, no padding)                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every length sits in the table, so a reader knows each value's offset
//! before touching the payload. Value *i* starts at the sum of the value
//! lengths of rows `0..i`.
//!
//! ## Truncation
//! Decoding never fails. A short table yields an empty mapping, since no
//! value offset is known until every row has been read. A short payload
//! drops the first unreadable value and every value after it. See [`DecodeStats`] for what was recovered.

mod reader;
mod writer;

use std::collections::BTreeMap;

pub use reader::{decode, decode_with_stats, DecodeStats};
pub use writer::{encode, encoded_len};

/// The mapping a container holds
///
/// Ordered by key, so encoding the same mapping always yields the same
/// bytes.
pub type Entries = BTreeMap<String, Vec<u8>>;

/// Size of the entry count field
pub const COUNT_SIZE: usize = 4;

/// Size of one table row before the key bytes: ValLen (4) + KeyLen (4)
pub const ROW_HEADER_SIZE: usize = 8;
