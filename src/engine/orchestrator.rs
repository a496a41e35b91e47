// src/engine/orchestrator.rs

//! Build orchestration: load state, fan out one compile task per directory
//! entry, wait for every task to settle, then fold the results back into the
//! timestamp record and persist it.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::compile::{CompileOutcome, CompileTask, CompilerBackend, SkipReason, TaskPlan};
use crate::errors::{Result, ShaderBuildError};
use crate::fs::FileSystem;
use crate::store::{TimestampRecord, TimestampStore};

use super::{BuildOptions, BuildSummary};

pub struct Orchestrator {
    fs: Arc<dyn FileSystem>,
    backend: Arc<dyn CompilerBackend>,
    options: BuildOptions,
}

impl Orchestrator {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        backend: Arc<dyn CompilerBackend>,
        options: BuildOptions,
    ) -> Self {
        Self {
            fs,
            backend,
            options,
        }
    }

    /// Run one build.
    ///
    /// Only fatal problems (unreadable state, unreadable input directory,
    /// failed state write) come back as `Err`. Individual shader failures
    /// are reported in the returned summary.
    pub async fn run(&self) -> Result<BuildSummary> {
        let opts = &self.options;
        let store = TimestampStore::for_output_dir(
            Arc::clone(&self.fs),
            &opts.output_dir,
            opts.use_timestamps,
        );

        let mut record = store.load()?;
        let entries = self.list_inputs()?;
        info!(
            input_dir = ?opts.input_dir,
            entries = entries.len(),
            known = record.len(),
            "scanning shader directory"
        );

        let task = Arc::new(CompileTask::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.backend),
            Arc::new(record.clone()),
            opts.input_dir.clone(),
            opts.output_dir.clone(),
            opts.use_timestamps,
        ));

        if opts.dry_run {
            print_dry_run(&task, &entries, &record);
            return Ok(BuildSummary::default());
        }

        self.fs
            .create_dir_all(&opts.output_dir)
            .map_err(ShaderBuildError::Other)?;

        let outcomes = self.dispatch(task, entries).await;
        let mut summary = BuildSummary::collect(outcomes, &mut record);

        if summary.any_compiled() && store.is_enabled() {
            store.save(&record)?;
            summary.persisted = true;
            debug!(path = ?store.path(), "timestamp file updated");
        }

        println!("{}", summary.status().message());
        if summary.has_failures() {
            eprintln!("{} shader(s) failed to compile.", summary.failed.len());
        }

        info!(
            compiled = summary.compiled.len(),
            skipped = summary.skipped,
            failed = summary.failed.len(),
            persisted = summary.persisted,
            "build finished"
        );
        Ok(summary)
    }

    fn list_inputs(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.options.input_dir;
        let mut entries = self
            .fs
            .read_dir(dir)
            .map_err(|source| ShaderBuildError::InputDir {
                path: dir.clone(),
                source,
            })?;
        entries.sort();
        Ok(entries)
    }

    /// Spawn one task per entry and collect every settled outcome.
    ///
    /// A failing or panicking task never cancels its siblings; we await all
    /// handles before returning.
    async fn dispatch(&self, task: Arc<CompileTask>, entries: Vec<PathBuf>) -> Vec<CompileOutcome> {
        let limiter = self.options.jobs.map(|n| Arc::new(Semaphore::new(n)));
        let mut handles = Vec::with_capacity(entries.len());

        for entry in entries {
            let file = entry
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| entry.to_string_lossy().into_owned());
            let task = Arc::clone(&task);
            let limiter = limiter.clone();

            let handle = tokio::spawn(async move {
                // The semaphore is never closed.
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                task.run(&entry).await
            });
            handles.push((file, handle));
        }

        debug!(tasks = handles.len(), "dispatched compile tasks");

        let mut outcomes = Vec::with_capacity(handles.len());
        for (file, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(join_err) => {
                    warn!(file = %file, error = %join_err, "compile task did not finish");
                    outcomes.push(CompileOutcome::Failed {
                        file,
                        error: format!("compile task aborted: {join_err}"),
                    });
                }
            }
        }
        outcomes
    }
}

/// Print which shaders would be compiled, without compiling anything.
///
/// Recorded shaders that are no longer in the input directory are listed as
/// `stale`; their entries stay in the timestamp file.
fn print_dry_run(task: &CompileTask, entries: &[PathBuf], record: &TimestampRecord) {
    println!("shaderbuild dry-run");
    let mut present = HashSet::new();
    for entry in entries {
        if let Some(name) = entry.file_name().and_then(|n| n.to_str()) {
            present.insert(name.to_string());
        }
        match task.plan(entry) {
            TaskPlan::Compile { invocation, .. } => {
                println!("  compile     {} -> {}", invocation.file, invocation.output.display());
            }
            TaskPlan::Done(CompileOutcome::Skipped { file, reason }) => {
                debug!(file = %file, ?reason, "dry-run: skip");
                if reason == SkipReason::Unchanged {
                    println!("  up-to-date  {file}");
                }
            }
            TaskPlan::Done(CompileOutcome::Failed { file, error }) => {
                println!("  error       {file}: {error}");
            }
            TaskPlan::Done(CompileOutcome::Succeeded { .. }) => {}
        }
    }
    for (file, mod_time) in record.iter().filter(|(file, _)| !present.contains(*file)) {
        println!("  stale       {file} (recorded {mod_time})");
    }
    debug!("dry-run complete (no compiler invoked)");
}
