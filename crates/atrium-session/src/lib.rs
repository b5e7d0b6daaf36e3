//! Profiles and their isolated storage partitions.
//!
//! A profile is a named identity; each one maps to its own browser storage
//! namespace so cookies and local storage never leak between identities.
//! The default profile uses the unpartitioned namespace.

pub mod manager;
pub mod partition;
pub mod profile;
pub mod store;

pub use manager::ProfileManager;
pub use partition::{partition_dir, partition_for};
pub use profile::{Profile, ProfileUpdate, DEFAULT_PROFILE_ID};
pub use store::ProfileDocument;
