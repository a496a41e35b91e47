// src/config/validate.rs

use tokio::sync::Semaphore;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ShaderBuildError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ShaderBuildError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.build))
    }
}

pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    match cfg.build.jobs {
        Some(0) => Err(ShaderBuildError::ConfigError(
            "[build].jobs must be >= 1 (got 0)".to_string(),
        )),
        // The job limit becomes a semaphore's permit count.
        Some(jobs) if jobs > Semaphore::MAX_PERMITS => Err(ShaderBuildError::ConfigError(format!(
            "[build].jobs must be <= {} (got {jobs})",
            Semaphore::MAX_PERMITS
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::BuildSection;

    #[test]
    fn zero_jobs_is_rejected() {
        let raw = RawConfigFile {
            build: BuildSection {
                jobs: Some(0),
                use_timestamps: true,
            },
        };
        match ConfigFile::try_from(raw) {
            Err(ShaderBuildError::ConfigError(msg)) => assert!(msg.contains("jobs")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn jobs_above_permit_limit_is_rejected() {
        let raw = RawConfigFile {
            build: BuildSection {
                jobs: Some(Semaphore::MAX_PERMITS + 1),
                use_timestamps: true,
            },
        };
        assert!(matches!(
            validate_config(&raw),
            Err(ShaderBuildError::ConfigError(_))
        ));

        let raw = RawConfigFile {
            build: BuildSection {
                jobs: Some(Semaphore::MAX_PERMITS),
                use_timestamps: true,
            },
        };
        assert!(validate_config(&raw).is_ok());
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(cfg.build.jobs, None);
        assert!(cfg.build.use_timestamps);
    }
}
