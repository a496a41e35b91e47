// src/compile/mod.rs

//! Per-shader compilation.
//!
//! - [`task`] decides whether one directory entry needs compiling and, if
//!   so, runs the compiler for it.
//! - [`backend`] provides the `CompilerBackend` trait and the production
//!   `ProcessCompiler`.

pub mod backend;
pub mod task;

use crate::types::ModTime;

pub use backend::{CompileInvocation, CompilerBackend, ProcessCompiler};
pub use task::{CompileTask, TaskPlan};

/// Recognized shader source extensions (fragment, vertex, compute).
pub const SHADER_EXTENSIONS: [&str; 3] = ["frag", "vert", "comp"];

/// Directory entry that is never compiled: the tool's own build location.
pub const RESERVED_DIR_NAME: &str = "build";

/// Appended after the full source file name: `foo.frag` -> `foo.frag.spv`.
pub const ARTIFACT_EXTENSION: &str = "spv";

/// Why an entry was not compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ReservedDir,
    UnrecognizedExtension,
    NonUtf8Name,
    Unchanged,
}

/// Result of processing one directory entry. Exactly one per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Skipped { file: String, reason: SkipReason },
    /// `mod_time` is the time observed before the compiler started.
    Succeeded { file: String, mod_time: ModTime },
    Failed { file: String, error: String },
}
