use std::path::PathBuf;

use atrium_common::PlatformError;

pub(super) const APP_NAME: &str = "atrium";

/// Returns the platform-specific configuration directory for Atrium.
///
/// - macOS: `~/Library/Application Support/atrium`
/// - Linux: `$XDG_CONFIG_HOME/atrium` (defaults to `~/.config/atrium`)
/// - Windows: `%APPDATA%\atrium`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for Atrium.
///
/// - macOS: `~/Library/Application Support/atrium`
/// - Linux: `$XDG_DATA_HOME/atrium` (defaults to `~/.local/share/atrium`)
/// - Windows: `%APPDATA%\atrium`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

pub fn cache_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::cache_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine cache directory".into()))?
        .join(APP_NAME))
}

/// Persisted profile store document.
pub fn profiles_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("profiles.json"))
}

/// Root of the per-profile browser storage directories.
pub fn partitions_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("partitions"))
}

pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}

pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(log_dir()?.join("crash-reports"))
}
