// src/compile/backend.rs

//! Pluggable compiler backend.
//!
//! Compile tasks talk to a `CompilerBackend` instead of spawning processes
//! directly, so tests can substitute a fake compiler that records which
//! shaders it was asked to build.
//!
//! - `ProcessCompiler` is the production implementation: one external
//!   process per shader, awaited through `tokio::process` so the runtime
//!   threads are never blocked on a child.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use tokio::process::Command;
use tracing::debug;

use super::ARTIFACT_EXTENSION;

/// Everything needed to compile one shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    /// File name relative to the input directory, e.g. `foo.frag`.
    pub file: String,
    /// `<input_dir>/<file>`
    pub source: PathBuf,
    /// `<output_dir>/<file>.spv`
    pub output: PathBuf,
}

impl CompileInvocation {
    pub fn for_file(input_dir: &Path, output_dir: &Path, file: &str) -> Self {
        Self {
            file: file.to_string(),
            source: input_dir.join(file),
            output: output_dir.join(format!("{file}.{ARTIFACT_EXTENSION}")),
        }
    }
}

/// Boxed future returned by [`CompilerBackend::compile`].
pub type CompileFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Trait abstracting how a single shader gets compiled.
///
/// An `Err` carries the diagnostic that should be shown to the user.
pub trait CompilerBackend: Send + Sync {
    fn compile<'a>(&'a self, invocation: &'a CompileInvocation) -> CompileFuture<'a>;
}

/// Runs the external compiler as `<compiler> <source> -o <output>`.
///
/// Working directory and environment are inherited from this process.
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    compiler: PathBuf,
}

impl ProcessCompiler {
    pub fn new(compiler: impl Into<PathBuf>) -> Self {
        Self {
            compiler: compiler.into(),
        }
    }
}

impl CompilerBackend for ProcessCompiler {
    fn compile<'a>(&'a self, invocation: &'a CompileInvocation) -> CompileFuture<'a> {
        Box::pin(async move {
            debug!(
                compiler = ?self.compiler,
                source = ?invocation.source,
                output = ?invocation.output,
                "spawning shader compiler"
            );

            let output = Command::new(&self.compiler)
                .arg(&invocation.source)
                .arg("-o")
                .arg(&invocation.output)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await
                .with_context(|| format!("spawning compiler {:?}", self.compiler))?;

            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);

            if output.status.success() {
                for line in stderr.lines().chain(stdout.lines()) {
                    debug!(file = %invocation.file, "compiler: {}", line);
                }
                return Ok(());
            }

            Err(anyhow!(failure_message(&output.status, &stdout, &stderr)))
        })
    }
}

/// Pick the most useful diagnostic from a failed compiler run.
fn failure_message(status: &std::process::ExitStatus, stdout: &str, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    format!("compiler exited with {status}")
}
