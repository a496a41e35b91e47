// src/compile/task.rs

//! Compile task for a single directory entry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::detect::needs_compile;
use crate::fs::FileSystem;
use crate::store::TimestampRecord;
use crate::types::ModTime;

use super::{
    CompileInvocation, CompileOutcome, CompilerBackend, SkipReason, RESERVED_DIR_NAME,
    SHADER_EXTENSIONS,
};

/// What should happen to one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPlan {
    /// Nothing to run; the outcome is already known.
    Done(CompileOutcome),
    /// The shader must be compiled. `mod_time` was read at decision time.
    Compile {
        invocation: CompileInvocation,
        mod_time: ModTime,
    },
}

/// Shared, read-only context for every compile task in one build.
///
/// The record is a snapshot taken before dispatch; tasks never mutate it.
pub struct CompileTask {
    fs: Arc<dyn FileSystem>,
    backend: Arc<dyn CompilerBackend>,
    record: Arc<TimestampRecord>,
    input_dir: PathBuf,
    output_dir: PathBuf,
    use_timestamps: bool,
}

impl CompileTask {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        backend: Arc<dyn CompilerBackend>,
        record: Arc<TimestampRecord>,
        input_dir: PathBuf,
        output_dir: PathBuf,
        use_timestamps: bool,
    ) -> Self {
        Self {
            fs,
            backend,
            record,
            input_dir,
            output_dir,
            use_timestamps,
        }
    }

    /// Decide what to do with `entry` without running anything.
    pub fn plan(&self, entry: &Path) -> TaskPlan {
        let Some(file) = entry.file_name().and_then(|n| n.to_str()) else {
            let file = entry.to_string_lossy().into_owned();
            debug!(file = %file, "skipping entry with non UTF-8 name");
            return TaskPlan::Done(CompileOutcome::Skipped {
                file,
                reason: SkipReason::NonUtf8Name,
            });
        };

        if let Some(reason) = ineligibility(file) {
            debug!(file = %file, ?reason, "skipping entry");
            return TaskPlan::Done(CompileOutcome::Skipped {
                file: file.to_string(),
                reason,
            });
        }

        let mod_time = match self.fs.modified(entry) {
            Ok(t) => t,
            Err(err) => {
                return TaskPlan::Done(CompileOutcome::Failed {
                    file: file.to_string(),
                    error: format!("{err:#}"),
                });
            }
        };

        if !needs_compile(file, mod_time, &self.record, self.use_timestamps) {
            debug!(file = %file, %mod_time, "shader unchanged");
            return TaskPlan::Done(CompileOutcome::Skipped {
                file: file.to_string(),
                reason: SkipReason::Unchanged,
            });
        }

        TaskPlan::Compile {
            invocation: CompileInvocation::for_file(&self.input_dir, &self.output_dir, file),
            mod_time,
        }
    }

    /// Plan and, if needed, compile `entry`.
    pub async fn run(&self, entry: &Path) -> CompileOutcome {
        match self.plan(entry) {
            TaskPlan::Done(outcome) => outcome,
            TaskPlan::Compile {
                invocation,
                mod_time,
            } => self.execute(invocation, mod_time).await,
        }
    }

    async fn execute(&self, invocation: CompileInvocation, mod_time: ModTime) -> CompileOutcome {
        info!(file = %invocation.file, output = ?invocation.output, "compiling shader");

        match self.backend.compile(&invocation).await {
            Ok(()) => {
                println!("Compiled shader {}", invocation.file);
                CompileOutcome::Succeeded {
                    file: invocation.file,
                    mod_time,
                }
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(file = %invocation.file, error = %message, "shader compilation failed");
                eprintln!(
                    "Error compiling shader {}, reason: {}",
                    invocation.file, message
                );
                CompileOutcome::Failed {
                    file: invocation.file,
                    error: message,
                }
            }
        }
    }
}

/// Returns why `file` is not a shader source, or `None` if it is one.
pub fn ineligibility(file: &str) -> Option<SkipReason> {
    if file == RESERVED_DIR_NAME {
        return Some(SkipReason::ReservedDir);
    }
    let ext = Path::new(file).extension().and_then(|e| e.to_str());
    match ext {
        Some(ext) if SHADER_EXTENSIONS.contains(&ext) => None,
        _ => Some(SkipReason::UnrecognizedExtension),
    }
}
