//! Embedded web surfaces.
//!
//! - [`SurfaceRegistry`] owns the named surfaces (apps, settings, rail),
//!   their visibility and z-order
//! - [`SurfaceBackend`] is the seam to the actual web engine; [`WryBackend`]
//!   implements it with `wry` child webviews, one storage context per
//!   profile partition
//! - Bidirectional IPC (Rust <-> JavaScript) and the `atrium://` protocol
//!   for bundled pages

pub mod backend;
pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod registry;
pub mod surface;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use backend::{SurfaceBackend, SurfaceError};
pub use content::ContentProvider;
pub use events::{PageLoadState, ScriptTag, SurfaceEvent};
pub use ipc::{IpcMessage, IpcPayload};
pub use manager::WryBackend;
pub use registry::SurfaceRegistry;
pub use surface::{SurfaceKind, SurfaceSpec, RAIL_URL, SETTINGS_URL};
