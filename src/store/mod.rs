// src/store/mod.rs

//! Persisted shader timestamps.
//!
//! The store is read once before any compilation and written at most once
//! after all compiles have settled. Reading is deliberately lenient: a
//! missing, empty or garbled file just means "no prior data". Anything else
//! that stops us from reading the file (permissions, I/O errors) aborts the
//! run before a single compiler is spawned.

pub mod record;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{is_not_found, Result, ShaderBuildError};
use crate::fs::FileSystem;

pub use record::TimestampRecord;

/// Name of the timestamp file inside the output directory.
pub const STATE_FILE_NAME: &str = "ShaderCompileTimes.json";

pub fn state_file_path(output_dir: &Path) -> PathBuf {
    output_dir.join(STATE_FILE_NAME)
}

/// Loads and saves the [`TimestampRecord`] for one output directory.
///
/// When `enabled` is false both operations are no-ops and no file is
/// touched.
#[derive(Debug, Clone)]
pub struct TimestampStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    enabled: bool,
}

impl TimestampStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf, enabled: bool) -> Self {
        Self { fs, path, enabled }
    }

    /// Store rooted at `<output_dir>/ShaderCompileTimes.json`.
    pub fn for_output_dir(fs: Arc<dyn FileSystem>, output_dir: &Path, enabled: bool) -> Self {
        Self::new(fs, state_file_path(output_dir), enabled)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn load(&self) -> Result<TimestampRecord> {
        if !self.enabled {
            debug!("timestamps disabled; not reading timestamp file");
            return Ok(TimestampRecord::new());
        }

        let contents = match self.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if is_not_found(&err) => {
                info!(path = ?self.path, "shader timestamp file not found, creating one");
                return Ok(TimestampRecord::new());
            }
            Err(err) => {
                return Err(ShaderBuildError::StateRead {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        if contents.trim().is_empty() {
            debug!(path = ?self.path, "timestamp file is empty; starting fresh");
            return Ok(TimestampRecord::new());
        }

        match serde_json::from_str::<TimestampRecord>(&contents) {
            Ok(record) => {
                debug!(path = ?self.path, entries = record.len(), "loaded shader timestamps");
                Ok(record)
            }
            Err(err) => {
                debug!(
                    path = ?self.path,
                    error = %err,
                    "timestamp file is not a valid timestamp map; ignoring it"
                );
                Ok(TimestampRecord::new())
            }
        }
    }

    /// Persist `record`, replacing the existing file.
    ///
    /// The record is written to a sibling `.tmp` file first and then renamed
    /// into place, so a failed write never leaves a truncated state file.
    pub fn save(&self, record: &TimestampRecord) -> Result<()> {
        if !self.enabled {
            debug!("timestamps disabled; not writing timestamp file");
            return Ok(());
        }

        let write_err = |source: anyhow::Error| ShaderBuildError::StateWrite {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_vec(record).map_err(|e| write_err(e.into()))?;
        let tmp = self.tmp_path();

        self.fs.write(&tmp, &json).map_err(write_err)?;
        self.fs.rename(&tmp, &self.path).map_err(write_err)?;

        info!(path = ?self.path, entries = record.len(), "stored shader timestamps");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
