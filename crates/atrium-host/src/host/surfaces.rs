//! Surface selection, profile switching, layout.

use serde_json::json;
use tracing::{debug, info, warn};

use atrium_common::types::Rect;
use atrium_common::{AtriumError, ProfileError};
use atrium_session::Profile;
use atrium_webview::{SurfaceBackend, SurfaceSpec};

use crate::shell::Shell;

use super::{Host, WindowBinding};

impl<B: SurfaceBackend, S: Shell> Host<B, S> {
    /// Create the rail and the active profile's surfaces in `window`, then
    /// show the first available surface.
    pub fn start(
        &mut self,
        window: WindowBinding,
        initial_surface: Option<&str>,
    ) -> Result<(), AtriumError> {
        self.attach_window(window);
        let preferred = initial_surface
            .map(str::to_string)
            .or_else(|| self.selected.clone());
        self.build_all(preferred.as_deref())?;
        self.refresh_title();
        Ok(())
    }

    /// The active profile, repairing a dangling active id on the way.
    pub fn active_profile(&mut self) -> Result<Profile, ProfileError> {
        match self.profiles.get_active() {
            Ok(profile) => Ok(profile.clone()),
            Err(ProfileError::Integrity(msg)) => {
                warn!(error = %msg, "active profile unresolved, repairing");
                let id = self.profiles.repair_active()?;
                self.profiles
                    .get(&id)
                    .cloned()
                    .ok_or(ProfileError::NotFound(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Whether `name` may become the visible surface for the active profile.
    pub fn is_switchable(&self, name: &str) -> bool {
        if !self.registry.contains(name) {
            return false;
        }
        if name == self.registry.settings_name() {
            return true;
        }
        let app_enabled = self.config.app(name).is_some_and(|a| a.enabled);
        let profile_enabled = self
            .profiles
            .get_active()
            .map(|p| p.is_app_enabled(name))
            .unwrap_or(false);
        app_enabled && profile_enabled
    }

    /// Show `name`. Disabled or unknown names are logged no-ops.
    pub fn switch_to(&mut self, name: &str) -> bool {
        if !self.is_switchable(name) {
            debug!(surface = %name, "switch ignored: surface not available");
            return false;
        }
        self.show(name);
        true
    }

    /// Make `id` the active profile and rebuild every content surface in its
    /// partition.
    pub fn switch_profile(&mut self, id: &str) -> Result<(), ProfileError> {
        self.profiles.set_active(id)?;
        info!(profile_id = %id, "profile switched");
        self.rebuild_content();
        Ok(())
    }

    /// Reload only the visible content surface.
    pub fn reload(&mut self) -> bool {
        let Some(active) = self.registry.active().map(str::to_string) else {
            return false;
        };
        match self.registry.reload(&active) {
            Ok(()) => true,
            Err(e) => {
                warn!(surface = %active, error = %e, "reload failed");
                false
            }
        }
    }

    /// Resize notification from the window identified by `token`.
    /// Notifications from an unregistered observer are ignored.
    pub fn on_resize(&mut self, token: u64, bounds: Rect) -> bool {
        if self.resize_observer != Some(token) {
            debug!(token, "resize from stale observer ignored");
            return false;
        }
        if let Some(window) = self.window.as_mut() {
            window.bounds = bounds;
        }
        self.relayout();
        true
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Recompute regions for the current window and visible surface.
    pub(super) fn relayout(&mut self) {
        let Some(window) = self.window else {
            return;
        };
        let active = self.registry.active().unwrap_or_default().to_string();
        let layout = self.layout.compute(window.bounds, &active);
        self.registry.apply_layout(&layout);
    }

    pub(super) fn show(&mut self, name: &str) {
        if self.registry.show_only(name) {
            self.selected = Some(name.to_string());
            self.relayout();
            self.notify_rail("set_active_surface", json!(name));
        }
    }

    /// Specs for the app surfaces the active profile gets.
    fn app_specs(&self, profile: &Profile) -> Vec<SurfaceSpec> {
        self.config
            .enabled_apps()
            .filter(|a| profile.is_app_enabled(&a.name))
            .map(|a| SurfaceSpec::app(a.name.clone(), a.url.clone()))
            .collect()
    }

    /// First surface worth showing: `preferred` if available, else the first
    /// app, else settings.
    fn pick_visible(&self, preferred: Option<&str>) -> String {
        if let Some(name) = preferred.filter(|n| self.is_switchable(n)) {
            return name.to_string();
        }
        self.registry
            .names()
            .into_iter()
            .find(|n| self.is_switchable(n))
            .unwrap_or(self.registry.settings_name())
            .to_string()
    }

    /// Rail plus content surfaces, from nothing.
    pub(super) fn build_all(&mut self, preferred: Option<&str>) -> Result<(), AtriumError> {
        let Some(window) = self.window else {
            return Err(AtriumError::Surface("no window".into()));
        };
        let layout = self.layout.compute(window.bounds, "");
        self.registry.create_rail(layout.rail)?;
        self.build_content(preferred)
    }

    /// Content surfaces for the active profile, then select and refresh the
    /// rail.
    fn build_content(&mut self, preferred: Option<&str>) -> Result<(), AtriumError> {
        let Some(window) = self.window else {
            return Err(AtriumError::Surface("no window".into()));
        };
        let profile = self.active_profile()?;
        let partition = self.profiles.partition_for(&profile.id);
        let specs = self.app_specs(&profile);
        let layout = self.layout.compute(window.bounds, "");

        self.registry
            .create_all(&specs, partition.as_deref(), layout.content)?;
        let target = self.pick_visible(preferred);
        self.show(&target);
        self.send_rail_state();
        info!(
            profile_id = %profile.id,
            surfaces = self.registry.names().len(),
            active = %target,
            "surfaces ready"
        );
        Ok(())
    }

    /// Destroy and recreate content surfaces in the active profile's
    /// partition, keeping the selection when still available.
    pub(super) fn rebuild_content(&mut self) {
        let preferred = self.selected.clone();
        self.registry.destroy_all();
        self.login_sync.reset_trackers();
        self.avatar_lookups.clear();
        self.unread.clear();
        self.refresh_title();
        if self.window.is_none() {
            debug!("no window, surfaces will be built on attach");
            return;
        }
        if let Err(e) = self.build_content(preferred.as_deref()) {
            warn!(error = %e, "failed to rebuild surfaces");
        }
    }

    /// Best-effort message to the rail.
    pub(super) fn notify_rail(&self, kind: &str, payload: serde_json::Value) {
        let rail = self.registry.rail_name();
        if let Err(e) = self.registry.send(rail, kind, &payload) {
            debug!(kind, error = %e, "rail notification dropped");
        }
    }

    /// Tell the rail which profile is active.
    pub(super) fn notify_profile(&mut self) {
        match self.active_profile() {
            Ok(profile) => match serde_json::to_value(&profile) {
                Ok(value) => self.notify_rail("profile_updated", value),
                Err(e) => warn!(error = %e, "failed to encode profile"),
            },
            Err(e) => warn!(error = %e, "no active profile to announce"),
        }
    }
}
