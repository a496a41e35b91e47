// src/lib.rs

pub mod cli;
pub mod compile;
pub mod config;
pub mod detect;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod store;
pub mod types;

use std::sync::Arc;

use tracing::debug;

use crate::cli::CliArgs;
use crate::compile::ProcessCompiler;
use crate::config::{load_and_validate, ConfigFile};
use crate::engine::{BuildOptions, BuildSummary, Orchestrator};
use crate::errors::Result;
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - optional config loading
/// - the real filesystem and the external compiler process
/// - one orchestrated build
pub async fn run(args: CliArgs) -> Result<BuildSummary> {
    let cfg = match &args.config {
        Some(path) => load_and_validate(path)?,
        None => ConfigFile::default(),
    };

    let options = build_options(&args, &cfg);
    debug!(?options, "resolved build options");

    let orchestrator = Orchestrator::new(
        Arc::new(RealFileSystem),
        Arc::new(ProcessCompiler::new(options.compiler.clone())),
        options,
    );
    orchestrator.run().await
}

/// Merge CLI arguments over config file values.
pub fn build_options(args: &CliArgs, cfg: &ConfigFile) -> BuildOptions {
    BuildOptions {
        compiler: args.compiler.clone(),
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        use_timestamps: !args.no_timestamps && cfg.build.use_timestamps,
        jobs: args.jobs.map(|j| j as usize).or(cfg.build.jobs),
        dry_run: args.dry_run,
    }
}
