pub mod errors;
pub mod id;
pub mod types;

pub use errors::{AtriumError, ConfigError, PlatformError, ProfileError};
pub use id::{new_correlation_id, new_id};
pub use types::Rect;

pub type Result<T> = std::result::Result<T, AtriumError>;
