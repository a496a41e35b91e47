// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `shaderbuild`.
///
/// Missing positionals make clap print the usage text and exit before any
/// filesystem or process work happens.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shaderbuild",
    version,
    about = "Compile changed shaders to SPIR-V, skipping files unchanged since the last build.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the shader compiler executable (e.g. glslc).
    #[arg(value_name = "COMPILER")]
    pub compiler: PathBuf,

    /// Directory containing the .frag / .vert / .comp sources.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory for compiled .spv files and ShaderCompileTimes.json.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Compile every shader without reading or saving timestamps (for
    /// shipping builds).
    #[arg(long = "noTimestamps", visible_alias = "no-timestamps")]
    pub no_timestamps: bool,

    /// Maximum number of compiler processes to run at once.
    ///
    /// Overrides `[build].jobs` from the config file. Unbounded if neither
    /// is set.
    #[arg(long, short = 'j', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,

    /// Optional TOML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHADERBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Show which shaders would be compiled, but don't run the compiler or
    /// write anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals_and_no_timestamps() {
        let args =
            CliArgs::try_parse_from(["shaderbuild", "glslc", "shaders", "out", "--noTimestamps"])
                .unwrap();
        assert_eq!(args.compiler, PathBuf::from("glslc"));
        assert_eq!(args.input_dir, PathBuf::from("shaders"));
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(args.no_timestamps);
        assert_eq!(args.jobs, None);
    }

    #[test]
    fn timestamps_are_on_by_default() {
        let args = CliArgs::try_parse_from(["shaderbuild", "glslc", "shaders", "out"]).unwrap();
        assert!(!args.no_timestamps);
        assert!(!args.dry_run);
    }

    #[test]
    fn missing_positionals_is_a_usage_error() {
        let err = CliArgs::try_parse_from(["shaderbuild", "glslc", "shaders"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn zero_jobs_is_rejected() {
        assert!(CliArgs::try_parse_from(["shaderbuild", "glslc", "in", "out", "--jobs", "0"]).is_err());
    }
}
