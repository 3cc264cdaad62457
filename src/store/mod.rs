//! Store Module
//!
//! A single save file holding every key/value pair of a process.
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Magic (4)        0x50 0x53 0x57 0x00     │
//! ├──────────────────────────────────────────┤
//! │ Container        (see container module)  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Responsibilities
//! - Own the live key → bytes mapping
//! - Refuse to interpret a file whose magic does not match
//! - Full rewrite on every save, full read on every load
//! - Typed get/set on top of the codec contract
//!
//! ## Failure Model
//! Nothing here panics. Load and save return a [`Result`](crate::Result)
//! and also report failures to the configured [`LogSink`](crate::LogSink);
//! reads have an explicit [`Lookup`] form and a forgiving form that falls
//! back to a caller default.

mod file;
mod save_store;
mod typed;

pub use file::{read_file, write_file, HEADER_SIZE, MAGIC};
pub use save_store::SaveStore;

use crate::error::CodecError;

/// Outcome of reading one key through a decoder
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Key present and decoded
    Found(T),

    /// Key not in the store
    Missing,

    /// Key present but the decoder rejected its bytes
    Invalid(CodecError),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The decoded value, if any
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing | Lookup::Invalid(_) => None,
        }
    }

    /// The decoded value, or `default` on any failure
    pub fn unwrap_or(self, default: T) -> T {
        self.found().unwrap_or(default)
    }
}
