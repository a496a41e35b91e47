// src/config/model.rs

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [build]
/// jobs = 8
/// use_timestamps = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub build: BuildSection,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub build: BuildSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(build: BuildSection) -> Self {
        Self { build }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Cap on concurrently running compiler processes.
    ///
    /// If omitted, every shader gets its own process immediately.
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Set to `false` to behave as if `--noTimestamps` was always passed.
    #[serde(default = "default_use_timestamps")]
    pub use_timestamps: bool,
}

fn default_use_timestamps() -> bool {
    true
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            jobs: None,
            use_timestamps: default_use_timestamps(),
        }
    }
}
