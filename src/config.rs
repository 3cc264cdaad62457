//! Configuration for binsave
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, StoreError};

/// Default save file name
pub const DEFAULT_FILE_NAME: &str = "BSAVEDATA.PSW";

/// Host-provided diagnostics callback
///
/// Invoked once per failure at the store boundary with a single formatted
/// line. Never invoked on success paths.
#[derive(Clone)]
pub struct LogSink(Arc<dyn Fn(&str) + Send + Sync>);

impl LogSink {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Forward a diagnostic message to the host
    pub fn emit(&self, message: &str) {
        (self.0)(message)
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogSink(..)")
    }
}

/// Configuration for a [`SaveStore`](crate::SaveStore)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Location
    // -------------------------------------------------------------------------
    /// Directory holding the save file
    pub data_dir: PathBuf,

    /// Save file name inside `data_dir`
    pub file_name: String,

    // -------------------------------------------------------------------------
    // Durability
    // -------------------------------------------------------------------------
    /// fsync the file after every save (flush alone otherwise)
    pub sync_on_save: bool,

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------
    /// Failure sink; `None` means failures are only traced
    pub log_sink: Option<LogSink>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            sync_on_save: false,
            log_sink: None,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Full path of the save file
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Check that the config names a usable file
    pub fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(StoreError::Config("file name is empty".to_string()));
        }
        if Path::new(&self.file_name).components().count() != 1 {
            return Err(StoreError::Config(format!(
                "file name must not contain path separators: {}",
                self.file_name
            )));
        }
        Ok(())
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the directory holding the save file
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the save file name
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    /// fsync after every save
    pub fn sync_on_save(mut self, sync: bool) -> Self {
        self.config.sync_on_save = sync;
        self
    }

    /// Install a failure sink
    pub fn log_sink<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.config.log_sink = Some(LogSink::new(f));
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
