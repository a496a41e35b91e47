// src/engine/summary.rs

use crate::compile::CompileOutcome;
use crate::store::TimestampRecord;

/// Final state of a build, as reported on the last console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    NoChanges,
    Completed,
    CompletedAndPersisted,
}

impl BuildStatus {
    pub fn message(self) -> &'static str {
        match self {
            BuildStatus::NoChanges => "No shader changes detected.",
            BuildStatus::Completed => "Compilation completed.",
            BuildStatus::CompletedAndPersisted => "Compilation completed. Timestamp file updated.",
        }
    }
}

/// Aggregate of every outcome in one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Shaders compiled successfully in this run, sorted.
    pub compiled: Vec<String>,
    pub skipped: usize,
    /// `(file, error message)` for every failed shader, sorted by file.
    pub failed: Vec<(String, String)>,
    /// Whether the timestamp file was rewritten.
    pub persisted: bool,
}

impl BuildSummary {
    /// Fold settled outcomes into a summary, recording every success in
    /// `record`. Failed shaders leave their entry untouched so they are
    /// retried next run.
    pub fn collect(
        outcomes: impl IntoIterator<Item = CompileOutcome>,
        record: &mut TimestampRecord,
    ) -> Self {
        let mut summary = BuildSummary::default();

        for outcome in outcomes {
            match outcome {
                CompileOutcome::Skipped { .. } => summary.skipped += 1,
                CompileOutcome::Succeeded { file, mod_time } => {
                    record.insert(file.clone(), mod_time);
                    summary.compiled.push(file);
                }
                CompileOutcome::Failed { file, error } => summary.failed.push((file, error)),
            }
        }

        summary.compiled.sort();
        summary.failed.sort();
        summary
    }

    pub fn any_compiled(&self) -> bool {
        !self.compiled.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn status(&self) -> BuildStatus {
        match (self.any_compiled(), self.persisted) {
            (false, _) => BuildStatus::NoChanges,
            (true, false) => BuildStatus::Completed,
            (true, true) => BuildStatus::CompletedAndPersisted,
        }
    }
}
