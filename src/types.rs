// src/types.rs

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A file modification time, reduced to whole epoch milliseconds.
///
/// Both the value read from the filesystem and the value loaded from the
/// timestamp file go through this type, so change detection always compares
/// like with like. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModTime(i64);

impl ModTime {
    pub const fn from_millis(millis: i64) -> Self {
        ModTime(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<SystemTime> for ModTime {
    fn from(time: SystemTime) -> Self {
        // Sub-millisecond precision is truncated; times before the epoch
        // become negative.
        let millis = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map(|m| -m)
                .unwrap_or(i64::MIN),
        };
        ModTime(millis)
    }
}

impl fmt::Display for ModTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
