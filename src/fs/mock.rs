// src/fs/mock.rs

use super::FileSystem;
use crate::types::ModTime;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { content: Vec<u8>, modified: ModTime },
    Dir(Vec<String>), // List of child names
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    read_failures: HashMap<PathBuf, io::ErrorKind>,
    write_failures: HashSet<PathBuf>,
}

/// In-memory filesystem for tests.
///
/// Cloning shares the underlying state, so a test can keep a handle while
/// the orchestrator owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut state = MockState::default();
        // Ensure root exists
        state
            .entries
            .insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Add (or replace) a file with modification time zero.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.add_file_with_mtime(path, content, ModTime::from_millis(0));
    }

    pub fn add_file_with_mtime(
        &self,
        path: impl AsRef<Path>,
        content: impl Into<Vec<u8>>,
        modified: ModTime,
    ) {
        let path = path.as_ref().to_path_buf();
        let mut state = self.state.lock().unwrap();
        state.entries.insert(
            path.clone(),
            MockEntry::File {
                content: content.into(),
                modified,
            },
        );
        link_into_parent(&mut state.entries, &path);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        ensure_dir_entry(&mut state.entries, path.as_ref());
    }

    /// Change the modification time of an existing file.
    pub fn set_modified(&self, path: impl AsRef<Path>, modified: ModTime) {
        let mut state = self.state.lock().unwrap();
        if let Some(MockEntry::File { modified: m, .. }) = state.entries.get_mut(path.as_ref()) {
            *m = modified;
        }
    }

    /// Make every subsequent read of `path` fail with `kind`.
    pub fn fail_reads_at(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        let mut state = self.state.lock().unwrap();
        state
            .read_failures
            .insert(path.as_ref().to_path_buf(), kind);
    }

    /// Make every subsequent write to `path` fail.
    pub fn fail_writes_at(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        state.write_failures.insert(path.as_ref().to_path_buf());
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let state = self.state.lock().unwrap();
        state.entries.contains_key(path.as_ref())
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        match state.entries.get(path.as_ref()) {
            Some(MockEntry::File { content, .. }) => Some(content.clone()),
            _ => None,
        }
    }
}

fn parent_of(path: &Path) -> Option<&Path> {
    path.parent().map(|parent| {
        if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        }
    })
}

fn link_into_parent(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    let Some(parent) = parent_of(path) else {
        return;
    };
    if parent == path {
        return;
    }

    ensure_dir_entry(entries, parent);
    if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }
}

fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    link_into_parent(entries, path);
}

fn unlink_from_parent(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    let (Some(parent), Some(name)) = (parent_of(path), path.file_name().and_then(|n| n.to_str()))
    else {
        return;
    };
    if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
        children.retain(|c| c != name);
    }
}

fn not_found(path: &Path) -> anyhow::Error {
    anyhow::Error::from(io::Error::new(
        io::ErrorKind::NotFound,
        format!("File not found: {:?}", path),
    ))
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let state = self.state.lock().unwrap();
        if let Some(kind) = state.read_failures.get(path) {
            return Err(io::Error::new(*kind, format!("injected read failure: {:?}", path)).into());
        }
        match state.entries.get(path) {
            Some(MockEntry::File { content, .. }) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        {
            let state = self.state.lock().unwrap();
            if state.write_failures.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("injected write failure: {:?}", path),
                )
                .into());
            }
        }
        self.add_file(path, contents);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.write_failures.contains(to) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected write failure: {:?}", to),
            )
            .into());
        }
        let entry = state.entries.remove(from).ok_or_else(|| not_found(from))?;
        unlink_from_parent(&mut state.entries, from);
        state.entries.insert(to.to_path_buf(), entry);
        link_into_parent(&mut state.entries, to);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(path);
        Ok(())
    }

    fn modified(&self, path: &Path) -> Result<ModTime> {
        let state = self.state.lock().unwrap();
        match state.entries.get(path) {
            Some(MockEntry::File { modified, .. }) => Ok(*modified),
            Some(MockEntry::Dir(_)) => Ok(ModTime::from_millis(0)),
            None => Err(not_found(path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let state = self.state.lock().unwrap();
        if let Some(kind) = state.read_failures.get(path) {
            return Err(io::Error::new(*kind, format!("injected read failure: {:?}", path)).into());
        }
        match state.entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            Some(MockEntry::File { .. }) => Err(anyhow!("Not a directory: {:?}", path)),
            None => Err(not_found(path)),
        }
    }
}
