// src/detect.rs

//! Change detection.

use crate::store::TimestampRecord;
use crate::types::ModTime;

/// Decide whether `file` has to be (re)compiled.
///
/// Only an exact match against the recorded time counts as unchanged. A file
/// that got *older* (e.g. restored from a backup) is recompiled as well.
pub fn needs_compile(
    file: &str,
    current: ModTime,
    record: &TimestampRecord,
    timestamps_enabled: bool,
) -> bool {
    if !timestamps_enabled {
        return true;
    }
    match record.get(file) {
        Some(recorded) => recorded != current,
        None => true,
    }
}
