// src/engine/mod.rs

//! Build engine.
//!
//! - [`orchestrator`] drives one incremental build end to end.
//! - [`summary`] aggregates per-shader outcomes into the final report.

pub mod orchestrator;
pub mod summary;

use std::path::PathBuf;

pub use orchestrator::Orchestrator;
pub use summary::{BuildStatus, BuildSummary};

/// Resolved options for one build (CLI merged over config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub compiler: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `false` with `--noTimestamps`: compile everything, read and write no
    /// state.
    pub use_timestamps: bool,
    /// Maximum number of concurrent compiler processes; `None` = one per
    /// shader, all at once.
    pub jobs: Option<usize>,
    pub dry_run: bool,
}

impl BuildOptions {
    pub fn new(
        compiler: impl Into<PathBuf>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler: compiler.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            use_timestamps: true,
            jobs: None,
            dry_run: false,
        }
    }
}
