#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use shaderbuild::engine::BuildOptions;
use shaderbuild::fs::mock::MockFileSystem;
use shaderbuild::fs::FileSystem;
use shaderbuild::store::{state_file_path, TimestampRecord};
use shaderbuild::types::ModTime;

/// Builder for an in-memory shader project: `shaders/` as input and `out/`
/// as output, on a [`MockFileSystem`].
pub struct MockProjectBuilder {
    fs: MockFileSystem,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl MockProjectBuilder {
    pub fn new() -> Self {
        let fs = MockFileSystem::new();
        let input_dir = PathBuf::from("shaders");
        fs.add_dir(&input_dir);
        Self {
            fs,
            input_dir,
            output_dir: PathBuf::from("out"),
        }
    }

    /// Add a source file with the given modification time (epoch millis).
    pub fn with_file(self, name: &str, mtime: i64) -> Self {
        self.fs.add_file_with_mtime(
            self.input_dir.join(name),
            "void main() {}",
            ModTime::from_millis(mtime),
        );
        self
    }

    pub fn with_dir(self, name: &str) -> Self {
        self.fs.add_dir(self.input_dir.join(name));
        self
    }

    /// Seed the timestamp file with raw contents.
    pub fn with_state(self, contents: &str) -> Self {
        self.fs
            .add_file(state_file_path(&self.output_dir), contents.as_bytes().to_vec());
        self
    }

    pub fn build(self) -> MockProject {
        MockProject {
            fs: self.fs,
            input_dir: self.input_dir,
            output_dir: self.output_dir,
        }
    }
}

impl Default for MockProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MockProject {
    pub fs: MockFileSystem,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl MockProject {
    pub fn fs_arc(&self) -> Arc<dyn FileSystem> {
        Arc::new(self.fs.clone())
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions::new("glslc", &self.input_dir, &self.output_dir)
    }

    pub fn state_path(&self) -> PathBuf {
        state_file_path(&self.output_dir)
    }

    pub fn touch(&self, name: &str, mtime: i64) {
        self.fs
            .set_modified(self.input_dir.join(name), ModTime::from_millis(mtime));
    }

    /// Parsed timestamp file, or `None` if it doesn't exist.
    ///
    /// Panics if the file exists but is not a valid timestamp map.
    pub fn read_state(&self) -> Option<TimestampRecord> {
        let bytes = self.fs.contents(self.state_path())?;
        Some(serde_json::from_slice(&bytes).expect("state file is not a timestamp map"))
    }
}
