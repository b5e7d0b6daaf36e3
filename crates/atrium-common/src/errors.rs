use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("notification error: {0}")]
    NotificationError(String),

    #[error("external handler error: {0}")]
    ExternalOpenError(String),

    #[error("dialog error: {0}")]
    DialogError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failures raised by the profile store.
///
/// Callers translate these into a user-visible message; none of them is
/// fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The referenced profile id does not exist.
    #[error("profile not found: {0}")]
    NotFound(String),

    /// A mutation was attempted on the immutable default profile.
    #[error("profile is protected: {0}")]
    Protected(String),

    /// The persisted active profile id does not resolve (store corruption).
    #[error("profile store integrity error: {0}")]
    Integrity(String),

    /// Reading or writing the backing document failed.
    #[error("profile store persistence error: {0}")]
    Persist(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AtriumError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("{0}")]
    Other(String),
}
