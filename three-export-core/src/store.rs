//! Persistence of the last-used export settings.
//!
//! The store owns a single well-known file and nothing else. Saving writes
//! the complete record unconditionally; restoring merges the persisted
//! values over the catalog defaults one key at a time, so records written
//! by older builds with fewer options still restore completely.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::settings::ExportSettings;

/// File name of the persisted export settings. The `.js` extension is
/// cosmetic; the content is plain JSON.
pub const SETTINGS_FILE_EXPORT: &str = "three_settings_export.js";

/// Errors raised while persisting or restoring settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read settings from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads and saves the export settings record at a fixed file location
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store keeping its settings file inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILE_EXPORT),
        }
    }

    /// Create a store using the process temp directory
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Full path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the complete record, overwriting any prior content.
    ///
    /// The record passed in is assumed already complete; no merge happens
    /// on write.
    pub fn save(&self, settings: &ExportSettings) -> Result<(), SettingsError> {
        debug!("saving settings to {}", self.path.display());
        let json = serde_json::to_vec(settings).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source: io::Error::from(source),
        })?;
        // One unbuffered write, so every write failure surfaces here
        // instead of being dropped with a buffer.
        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Restore the last-used record.
    ///
    /// A file that cannot be opened is the normal first-run case and yields
    /// the full catalog defaults. Otherwise every recognized key falls back
    /// to its default when absent from the file, and keys the catalog does
    /// not know are dropped. An I/O failure while reading an opened file is
    /// a read error; a file that reads fine but is not valid JSON is a
    /// parse error. In both cases the caller decides whether to abort or
    /// start over from defaults.
    pub fn load(&self) -> Result<ExportSettings, SettingsError> {
        let file = match File::open(&self.path) {
            Ok(file) => {
                debug!("settings cache found at {}", self.path.display());
                file
            }
            Err(err) => {
                debug!("no settings file ({}), using defaults", err);
                return Ok(crate::catalog::defaults());
            }
        };

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| {
            if source.classify() == serde_json::error::Category::Io {
                SettingsError::Read {
                    path: self.path.clone(),
                    source: io::Error::from(source),
                }
            } else {
                SettingsError::Parse {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }
}
