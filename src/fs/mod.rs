// src/fs/mod.rs

//! Filesystem seam.
//!
//! The store and the orchestrator only touch the disk through
//! [`FileSystem`], so tests can swap in [`mock::MockFileSystem`].

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::ModTime;

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create or truncate `path` and write `contents`, creating missing
    /// parent directories.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Move `from` over `to`, replacing any existing file.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Last modification time of `path`.
    fn modified(&self, path: &Path) -> Result<ModTime>;

    /// Return the immediate entries of a directory (not recursive).
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating dir {:?}", parent))?;
            }
        }
        let mut file = fs::File::create(path).with_context(|| format!("creating file {:?}", path))?;
        file.write_all(contents).with_context(|| format!("writing to file {:?}", path))?;
        file.sync_all().with_context(|| format!("flushing file {:?}", path))?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).with_context(|| format!("renaming {:?} to {:?}", from, to))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn modified(&self, path: &Path) -> Result<ModTime> {
        let meta = fs::metadata(path).with_context(|| format!("reading metadata of {:?}", path))?;
        let mtime = meta
            .modified()
            .with_context(|| format!("reading modification time of {:?}", path))?;
        Ok(ModTime::from(mtime))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry.with_context(|| format!("reading entry of dir {:?}", path))?;
            entries.push(entry.path());
        }
        Ok(entries)
    }
}
