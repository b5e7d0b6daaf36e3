//! The Host Controller.
//!
//! One `Host` owns every piece of mutable session state: the surface
//! registry, the profile store, the login-sync coordinator, the window
//! binding and the pending user prompts. Nothing here is process-global,
//! so several hosts can coexist under test.

mod events;
mod ipc;
mod restart;
mod surfaces;


pub use ipc::ALLOWED_IPC_KINDS;

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use atrium_common::types::Rect;
use atrium_config::schema::{RAIL_SURFACE, SETTINGS_SURFACE};
use atrium_config::AtriumConfig;
use atrium_layout::LayoutEngine;
use atrium_navigation::NavigationPolicy;
use atrium_session::ProfileManager;
use atrium_webview::{SurfaceBackend, SurfaceRegistry};

use crate::avatar::{AvatarProbe, NoopAvatarProbe};
use crate::login_sync::LoginSyncCoordinator;
use crate::shell::Shell;

/// The window surfaces currently live in. `token` identifies the window's
/// resize subscription; events carrying any other token are stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowBinding {
    pub token: u64,
    pub bounds: Rect,
}

/// An outstanding "open here or externally?" question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkPrompt {
    pub id: u64,
    pub surface: String,
    pub url: String,
}

/// An avatar lookup in flight: the surface it runs in and the profile it
/// was started for.
#[derive(Debug, Clone, PartialEq)]
struct AvatarLookup {
    surface: String,
    profile_id: String,
}

pub struct Host<B: SurfaceBackend, S: Shell> {
    config: AtriumConfig,
    registry: SurfaceRegistry<B>,
    profiles: ProfileManager,
    layout: LayoutEngine,
    policy: NavigationPolicy,
    login_sync: LoginSyncCoordinator,
    avatar_probe: Box<dyn AvatarProbe>,
    /// Outstanding avatar lookups by ticket. Emptied whenever content
    /// surfaces are torn down, so late results cannot match.
    avatar_lookups: HashMap<u64, AvatarLookup>,
    next_lookup: u64,
    shell: S,
    window: Option<WindowBinding>,
    /// Token of the registered resize observer. At most one at a time.
    resize_observer: Option<u64>,
    /// Surface the user last selected; survives restarts.
    selected: Option<String>,
    unread: BTreeMap<String, u64>,
    prompts: HashMap<u64, LinkPrompt>,
    next_prompt_id: u64,
}

impl<B: SurfaceBackend, S: Shell> Host<B, S> {
    pub fn new(config: AtriumConfig, profiles: ProfileManager, backend: B, shell: S) -> Self {
        Self {
            registry: SurfaceRegistry::new(backend, RAIL_SURFACE, SETTINGS_SURFACE),
            layout: LayoutEngine::new(config.window.rail_width),
            policy: NavigationPolicy::from_config(&config),
            login_sync: LoginSyncCoordinator::from_config(&config),
            avatar_probe: Box::new(NoopAvatarProbe),
            avatar_lookups: HashMap::new(),
            next_lookup: 1,
            config,
            profiles,
            shell,
            window: None,
            resize_observer: None,
            selected: None,
            unread: BTreeMap::new(),
            prompts: HashMap::new(),
            next_prompt_id: 1,
        }
    }

    pub fn with_avatar_probe(mut self, probe: Box<dyn AvatarProbe>) -> Self {
        self.avatar_probe = probe;
        self
    }

    pub fn config(&self) -> &AtriumConfig {
        &self.config
    }

    pub fn registry(&self) -> &SurfaceRegistry<B> {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        self.registry.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.registry.backend_mut()
    }

    pub fn profiles(&self) -> &ProfileManager {
        &self.profiles
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    pub fn login_sync(&self) -> &LoginSyncCoordinator {
        &self.login_sync
    }

    pub fn window(&self) -> Option<&WindowBinding> {
        self.window.as_ref()
    }

    /// Number of registered resize observers (0 or 1).
    pub fn resize_observer_count(&self) -> usize {
        usize::from(self.resize_observer.is_some())
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn unread_total(&self) -> u64 {
        self.unread.values().sum()
    }

    pub fn pending_prompts(&self) -> usize {
        self.prompts.len()
    }

    /// When the event loop must wake up next for login-sync timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.login_sync.next_deadline()
    }

    // =========================================================================
    // WINDOW BINDING
    // =========================================================================

    /// Bind a (new) window and register its resize observer, replacing any
    /// previous registration.
    pub fn attach_window(&mut self, binding: WindowBinding) {
        if let Some(old) = self.resize_observer.replace(binding.token) {
            if old != binding.token {
                debug!(old, new = binding.token, "replacing resize observer");
            }
        }
        self.window = Some(binding);
    }

    /// Forget the window and deregister its resize observer.
    pub fn detach_window(&mut self) {
        if let Some(token) = self.resize_observer.take() {
            debug!(token, "resize observer removed");
        }
        self.window = None;
    }

    /// Window title with the unread total appended when non-zero.
    pub fn window_title(&self) -> String {
        let total = self.unread_total();
        if total > 0 {
            format!("{} ({total})", self.config.window.title)
        } else {
            self.config.window.title.clone()
        }
    }

    fn refresh_title(&mut self) {
        let title = self.window_title();
        self.shell.set_title(&title);
    }
}
