// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Fatal conditions (bad config, unreadable state, failed state write) are
//! `ShaderBuildError`s. A single shader failing to compile is *not* an error
//! at this level; it is reported as `CompileOutcome::Failed` and aggregated
//! into the `BuildSummary`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaderBuildError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("failed to read timestamp file {path:?}: {source:#}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write timestamp file {path:?}: {source:#}")]
    StateWrite {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to list input directory {path:?}: {source:#}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ShaderBuildError>;

/// Returns true if any error in the chain is an `io::Error` of kind
/// `NotFound`.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn not_found_is_detected_through_context() {
        let err: anyhow::Result<()> =
            Err(std::io::Error::from(std::io::ErrorKind::NotFound)).context("reading state");
        assert!(is_not_found(&err.unwrap_err()));
    }

    #[test]
    fn other_io_kinds_are_not_not_found() {
        let err = anyhow::Error::from(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        ));
        assert!(!is_not_found(&err));
        assert!(!is_not_found(&anyhow::anyhow!("plain message")));
    }
}
