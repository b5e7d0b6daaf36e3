//! Host Controller and Login-Sync Coordinator.
//!
//! `Host` is the single context object owning the surface registry, the
//! profile store, the login-sync state and the window binding. It is generic
//! over the web engine ([`SurfaceBackend`](atrium_webview::SurfaceBackend))
//! and over the OS/UI side effects ([`Shell`]), so the whole controller runs
//! against test doubles.

pub mod avatar;
pub mod host;
pub mod login_sync;
pub mod shell;

pub use avatar::{AvatarProbe, NoopAvatarProbe, ScriptAvatarProbe};
pub use host::{Host, LinkPrompt, WindowBinding};
pub use login_sync::{LoginSyncCoordinator, RestartGuard};
pub use shell::{LinkChoice, Shell};
