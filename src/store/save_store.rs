//! SaveStore
//!
//! The live mapping plus the load/save path around it.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::codec::{Decoder, Encoder};
use crate::config::StoreConfig;
use crate::container::{self, DecodeStats, Entries};
use crate::error::{CodecError, Result, StoreError};

use super::file;
use super::Lookup;

/// Key/value save store backed by one file
///
/// ## Concurrency
/// - `entries`: Mutex around the mapping, held only for the duration of a
///   single get/set
/// - `io_lock`: serializes load and save so two file passes never overlap
/// - Lock order is always `io_lock` → `entries`
///
/// Nothing guards against another process writing the same file.
///
/// Codecs passed to [`get_or_add`](Self::get_or_add) run while the mapping
/// is locked and must not call back into the store.
pub struct SaveStore {
    /// Store configuration
    config: StoreConfig,

    /// Resolved save file path
    path: PathBuf,

    /// In-memory mapping
    entries: Mutex<Entries>,

    /// Serializes file passes (load/save)
    io_lock: Mutex<()>,
}

impl SaveStore {
    /// Open the store described by `config`
    ///
    /// On open:
    /// 1. Validate the config (the only error returned)
    /// 2. If the save file exists, load it
    /// 3. Otherwise create the directory, save an empty store, and load it
    ///    back
    ///
    /// Failures in steps 2 and 3 are reported to the log sink and leave the
    /// store empty but usable.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let path = config.path();
        let store = Self {
            config,
            path,
            entries: Mutex::new(Entries::new()),
            io_lock: Mutex::new(()),
        };

        if store.path.exists() {
            let _ = store.load();
        } else {
            debug!(path = %store.path.display(), "no save file, creating one");
            match fs::create_dir_all(&store.config.data_dir) {
                Ok(()) => {
                    if store.save().is_ok() {
                        let _ = store.load();
                    }
                }
                Err(e) => store.report("WRITE", &StoreError::Io(e)),
            }
        }

        Ok(store)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the file's parent as `data_dir`
    pub fn open_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                StoreError::Config(format!("not a file path: {}", path.display()))
            })?;
        let data_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        Self::open(
            StoreConfig::builder()
                .data_dir(data_dir)
                .file_name(file_name)
                .build(),
        )
    }

    // =========================================================================
    // Load / Save
    // =========================================================================

    /// Replace the mapping with the save file's contents
    ///
    /// - Header mismatch: mapping is cleared, error returned and reported
    /// - I/O failure: mapping is left as it was, error returned and reported
    /// - Truncated container: whatever was readable is loaded, not an error
    pub fn load(&self) -> Result<DecodeStats> {
        let _io = self.io_lock.lock();

        match file::read_file(&self.path) {
            Ok((entries, stats)) => {
                if stats.truncated {
                    warn!(
                        path = %self.path.display(),
                        declared = stats.rows_declared,
                        recovered = stats.entries_decoded,
                        "save file truncated, loaded partial contents"
                    );
                }
                *self.entries.lock() = entries;
                Ok(stats)
            }
            Err(e) => {
                if matches!(e, StoreError::HeaderMismatch { .. }) {
                    self.entries.lock().clear();
                }
                self.report("READ", &e);
                Err(e)
            }
        }
    }

    /// Write the whole mapping to the save file, replacing it
    pub fn save(&self) -> Result<()> {
        let _io = self.io_lock.lock();

        let bytes = {
            let entries = self.entries.lock();
            container::encode(&entries)
        };

        match file::write_file(&self.path, &bytes, self.config.sync_on_save) {
            Ok(_) => Ok(()),
            Err(e) => {
                self.report("WRITE", &e);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Codec-based access
    // =========================================================================

    /// Read `key` through `decoder`, reporting exactly what happened
    pub fn lookup<T, D>(&self, key: &str, decoder: D) -> Lookup<T>
    where
        D: Decoder<T>,
    {
        let Some(bytes) = self.entries.lock().get(key).cloned() else {
            return Lookup::Missing;
        };
        match decoder.decode(&bytes) {
            Ok(value) => Lookup::Found(value),
            Err(e) => {
                debug!(key, error = %e, "stored value did not decode");
                Lookup::Invalid(e)
            }
        }
    }

    /// Read `key` through `decoder`, or `default` if missing or undecodable
    pub fn get<T, D>(&self, key: &str, decoder: D, default: T) -> T
    where
        D: Decoder<T>,
    {
        self.lookup(key, decoder).unwrap_or(default)
    }

    /// Read `key`, inserting the encoded `default` if it is absent
    ///
    /// - Present: decoded value, or `default` if it does not decode (the
    ///   stored bytes are left alone)
    /// - Absent: `default` is encoded and inserted in memory only; call
    ///   [`save`](Self::save) to persist it
    pub fn get_or_add<T, D, E>(&self, key: &str, decoder: D, default: T, encoder: E) -> T
    where
        D: Decoder<T>,
        E: Encoder<T>,
    {
        let mut entries = self.entries.lock();

        if let Some(bytes) = entries.get(key) {
            return match decoder.decode(bytes) {
                Ok(value) => value,
                Err(e) => {
                    debug!(key, error = %e, "stored value did not decode, using default");
                    default
                }
            };
        }

        match encoder.encode(&default) {
            Ok(bytes) => {
                entries.insert(key.to_string(), bytes);
            }
            Err(e) => debug!(key, error = %e, "default did not encode, not added"),
        }
        default
    }

    /// Encode `value` and store it under `key` (in memory only)
    pub fn set<T, E>(&self, key: &str, encoder: E, value: &T) -> std::result::Result<(), CodecError>
    where
        T: ?Sized,
        E: Encoder<T>,
    {
        let bytes = encoder.encode(value).map_err(|e| {
            debug!(key, error = %e, "value did not encode, not stored");
            e
        })?;
        self.entries.lock().insert(key.to_string(), bytes);
        Ok(())
    }

    // =========================================================================
    // Raw access
    // =========================================================================

    /// Stored bytes for `key`
    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }

    /// Store bytes under `key` as-is
    pub fn set_raw(&self, key: &str, bytes: Vec<u8>) {
        self.entries.lock().insert(key.to_string(), bytes);
    }

    /// Remove `key`, returning its bytes
    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// All keys, in save order
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry (in memory only)
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Copy of the current mapping
    pub fn snapshot(&self) -> Entries {
        self.entries.lock().clone()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Save file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Trace a failure and forward it to the log sink
    fn report(&self, op: &str, err: &StoreError) {
        error!(op, path = %self.path.display(), error = %err, "save store failure");
        if let Some(sink) = &self.config.log_sink {
            sink.emit(&format!("{} - {} : {}", op, err.kind(), err));
        }
    }
}

impl std::fmt::Debug for SaveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveStore")
            .field("path", &self.path)
            .field("entries", &self.len())
            .finish()
    }
}
