use std::fs;

use atrium_common::PlatformError;

use super::resolve::{cache_dir, config_dir, crash_report_dir, data_dir, partitions_dir};

/// Creates all Atrium directories if they do not already exist.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    for dir in [
        config_dir()?,
        data_dir()?,
        cache_dir()?,
        partitions_dir()?,
        crash_report_dir()?,
    ] {
        fs::create_dir_all(&dir).map_err(|e| {
            PlatformError::PathError(format!("failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}
