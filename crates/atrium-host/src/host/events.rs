//! Surface events: login tracking, intercepted navigations, script results.

use std::time::Instant;

use serde_json::json;
use tracing::{debug, info, warn};

use atrium_common::ProfileError;
use atrium_navigation::{Classification, NavigationDecision};
use atrium_session::ProfileUpdate;
use atrium_webview::{ScriptTag, SurfaceBackend, SurfaceEvent};

use crate::shell::{LinkChoice, Shell};

use super::{AvatarLookup, Host, LinkPrompt};

impl<B: SurfaceBackend, S: Shell> Host<B, S> {
    /// Drain and handle every pending backend event.
    pub fn pump_events(&mut self, now: Instant) {
        for event in self.registry.drain_events() {
            self.handle_event(event, now);
        }
    }

    pub fn handle_event(&mut self, event: SurfaceEvent, now: Instant) {
        match event {
            SurfaceEvent::PageLoad { surface, url, .. } => self.on_page_load(&surface, &url, now),
            SurfaceEvent::IpcMessage { surface, body } => self.handle_ipc(&surface, &body),
            SurfaceEvent::NavigationDenied {
                surface,
                decision,
                target,
                ..
            } => self.apply_decision(&surface, decision, &target),
            SurfaceEvent::NewWindowRequested { surface, url } => {
                self.on_new_window(&surface, &url)
            }
            SurfaceEvent::ScriptResult {
                surface,
                tag: ScriptTag::Avatar(ticket),
                value,
            } => self.on_avatar_result(&surface, ticket, &value),
            SurfaceEvent::Closed { surface } => {
                self.login_sync.forget(&surface);
            }
        }
    }

    fn on_page_load(&mut self, surface: &str, url: &str, now: Instant) {
        if surface == self.registry.rail_name() || surface == self.registry.settings_name() {
            return;
        }
        if self.login_sync.observe(surface, url, now) {
            self.probe_avatar(surface);
        }
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Act on a refused in-place navigation.
    pub(super) fn apply_decision(
        &mut self,
        surface: &str,
        decision: NavigationDecision,
        target: &str,
    ) {
        match decision {
            NavigationDecision::AllowInPlace => {}
            NavigationDecision::DenyAndExternal => {
                info!(surface = %surface, url = %target, "handing off to external handler");
                self.shell.open_external(target);
            }
            NavigationDecision::DenyAndPrompt => {
                let prompt = LinkPrompt {
                    id: self.next_prompt_id,
                    surface: surface.to_string(),
                    url: target.to_string(),
                };
                self.next_prompt_id += 1;
                debug!(id = prompt.id, surface = %surface, url = %target, "asking where to open link");
                self.shell.prompt_link_choice(&prompt);
                self.prompts.insert(prompt.id, prompt);
            }
        }
    }

    /// A page asked for a secondary window. No window exists yet; classify
    /// the target exactly as an in-place navigation from that surface.
    fn on_new_window(&mut self, surface: &str, url: &str) {
        let current = self.registry.current_url(surface);
        let home = self.registry.home_url(surface);
        let (decision, classified) = self.policy.decide_from(home, current.as_deref(), url);
        match (decision, classified.kind) {
            (NavigationDecision::AllowInPlace, Classification::Local) => {
                debug!(surface = %surface, url = %url, "local popup ignored");
            }
            (NavigationDecision::AllowInPlace, Classification::AppDomain)
                if self.registry.contains(surface) =>
            {
                if let Err(e) = self.registry.load_url(surface, &classified.target) {
                    warn!(surface = %surface, error = %e, "failed to follow link in place");
                }
            }
            (NavigationDecision::AllowInPlace, _) => {
                let partition = self.registry.partition().map(str::to_string);
                self.shell
                    .open_auxiliary(&classified.target, partition.as_deref());
            }
            (decision, _) => self.apply_decision(surface, decision, &classified.target),
        }
    }

    /// The user answered a link prompt. Cancel leaves everything unchanged.
    pub fn resolve_link_choice(&mut self, prompt_id: u64, choice: LinkChoice) {
        let Some(prompt) = self.prompts.remove(&prompt_id) else {
            debug!(prompt_id, "answer for unknown link prompt dropped");
            return;
        };
        match choice {
            LinkChoice::OpenHere => {
                let partition = self.registry.partition().map(str::to_string);
                self.shell.open_auxiliary(&prompt.url, partition.as_deref());
            }
            LinkChoice::OpenExternally => self.shell.open_external(&prompt.url),
            LinkChoice::Cancel => {
                debug!(surface = %prompt.surface, "link prompt cancelled");
            }
        }
    }

    // =========================================================================
    // AVATAR
    // =========================================================================

    fn probe_avatar(&mut self, surface: &str) {
        let Some(script) = self.avatar_probe.script() else {
            return;
        };
        let profile_id = match self.profiles.get_active() {
            Ok(p) if p.avatar_path.is_none() => p.id.clone(),
            _ => return,
        };
        let ticket = self.next_lookup;
        self.next_lookup += 1;
        match self
            .registry
            .evaluate(surface, script, ScriptTag::Avatar(ticket))
        {
            Ok(()) => {
                self.avatar_lookups.insert(
                    ticket,
                    AvatarLookup {
                        surface: surface.to_string(),
                        profile_id,
                    },
                );
            }
            Err(e) => debug!(surface = %surface, error = %e, "avatar probe not started"),
        }
    }

    /// Apply a probe result. Only the outstanding lookup for this ticket
    /// counts, and only while the profile it was started for is still
    /// active and has no picture. Failures are dropped.
    fn on_avatar_result(&mut self, surface: &str, ticket: u64, value: &str) {
        let Some(lookup) = self.avatar_lookups.remove(&ticket) else {
            debug!(surface = %surface, ticket, "avatar result without lookup dropped");
            return;
        };
        if lookup.surface != surface || !self.registry.is_alive(surface) {
            debug!(surface = %surface, "avatar result for dead surface dropped");
            return;
        }
        let Some(avatar) = self.avatar_probe.parse(value) else {
            debug!(surface = %surface, "avatar probe found nothing");
            return;
        };
        let id = match self.profiles.get_active() {
            Ok(p) if p.id == lookup.profile_id && p.avatar_path.is_none() => p.id.clone(),
            _ => {
                debug!(profile_id = %lookup.profile_id, "avatar result for inactive profile dropped");
                return;
            }
        };
        match self.profiles.update(&id, ProfileUpdate::avatar(Some(avatar))) {
            Ok(_) => {
                info!(profile_id = %id, "profile picture captured");
                self.notify_profile();
            }
            Err(e) => debug!(profile_id = %id, error = %e, "avatar not stored"),
        }
    }

    /// Result of the avatar file picker started by `Shell::pick_avatar`.
    pub fn avatar_picked(&mut self, profile_id: &str, path: Option<String>) {
        let settings = self.registry.settings_name().to_string();
        let Some(path) = path else {
            self.send_to(&settings, "avatar_selected", json!({ "id": profile_id, "path": null }));
            return;
        };
        match self
            .profiles
            .update(profile_id, ProfileUpdate::avatar(Some(path.clone())))
        {
            Ok(_) => {
                self.send_to(&settings, "avatar_selected", json!({ "id": profile_id, "path": path }));
                self.send_profiles(&settings);
                if self.profiles.active_id() == profile_id {
                    self.notify_profile();
                }
            }
            Err(e) => self.send_profile_error(&settings, &e),
        }
    }

    pub(super) fn send_profile_error(&self, surface: &str, error: &ProfileError) {
        let kind = match error {
            ProfileError::NotFound(_) => "not_found",
            ProfileError::Protected(_) => "protected",
            ProfileError::Integrity(_) => "integrity",
            ProfileError::Persist(_) => "persist",
        };
        warn!(surface = %surface, error = %error, "profile operation failed");
        self.send_to(
            surface,
            "profile_error",
            json!({ "kind": kind, "message": error.to_string() }),
        );
    }
}
