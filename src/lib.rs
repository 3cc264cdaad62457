//! # binsave
//!
//! Pluggable binary codecs and a single-file key-value save store:
//! - Codec contract for turning typed values into bytes and back
//! - Flat container format packing a whole key → bytes mapping
//! - Save store with a magic-header file, full load / full save
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Caller values                           │
//! │              (i32, f64, String, serde types)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  codec (encode / decode)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      SaveStore                              │
//! │              key → bytes mapping (Mutex)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  container (table + payload)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Save file                              │
//! │              magic header + container bytes                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use binsave::{codec, SaveStore, StoreConfig};
//!
//! let config = StoreConfig::builder()
//!     .data_dir("./saves")
//!     .file_name("slot1.psw")
//!     .log_sink(|msg| eprintln!("{msg}"))
//!     .build();
//! let store = SaveStore::open(config)?;
//!
//! store.set_i32("score", 42);
//! store.set("name", codec::Utf8, "héllo")?;
//! store.save()?;
//!
//! assert_eq!(store.get_i32("score", 0), 42);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod container;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CodecError, Result, StoreError};
pub use config::{LogSink, StoreConfig};
pub use codec::{Codec, Decoder, Encoder};
pub use container::{DecodeStats, Entries};
pub use store::{Lookup, SaveStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of binsave
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
