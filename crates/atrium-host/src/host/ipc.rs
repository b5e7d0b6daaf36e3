//! IPC dispatch for the rail, settings and content-surface protocols.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use atrium_session::ProfileUpdate;
use atrium_webview::{IpcMessage, IpcPayload, SurfaceBackend};

use crate::shell::Shell;

use super::Host;

/// Every inbound kind the host understands. Anything else is dropped.
pub const ALLOWED_IPC_KINDS: &[&str] = &[
    "rail_ready",
    "switch_surface",
    "reload",
    "profiles_list",
    "profile_create",
    "profile_update",
    "profile_delete",
    "profile_switch",
    "avatar_select",
    "unread_count",
    "show_notification",
];

const RAIL_KINDS: &[&str] = &[
    "rail_ready",
    "switch_surface",
    "reload",
    "profiles_list",
    "profile_switch",
];

const SETTINGS_KINDS: &[&str] = &[
    "switch_surface",
    "profiles_list",
    "profile_create",
    "profile_update",
    "profile_delete",
    "profile_switch",
    "avatar_select",
];

const CONTENT_KINDS: &[&str] = &["unread_count", "show_notification"];

const AUXILIARY_KINDS: &[&str] = &["show_notification"];

#[derive(Debug, Deserialize)]
struct IdPayload {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    avatar_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdatePayload {
    id: String,
    #[serde(flatten)]
    update: ProfileUpdate,
}

#[derive(Debug, Deserialize)]
struct NotificationPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

impl<B: SurfaceBackend, S: Shell> Host<B, S> {
    /// Kinds `surface` is allowed to send.
    fn permitted_kinds(&self, surface: &str) -> &'static [&'static str] {
        if surface == self.registry.rail_name() {
            RAIL_KINDS
        } else if surface == self.registry.settings_name() {
            SETTINGS_KINDS
        } else if self.registry.contains(surface) {
            CONTENT_KINDS
        } else {
            AUXILIARY_KINDS
        }
    }

    /// Validate and dispatch one raw IPC body from `surface`.
    pub fn handle_ipc(&mut self, surface: &str, body: &str) {
        let Some(msg) = IpcMessage::from_json(body) else {
            warn!(surface = %surface, body_len = body.len(), "IPC message is not a valid envelope");
            return;
        };
        if !ALLOWED_IPC_KINDS.contains(&msg.kind.as_str()) {
            warn!(surface = %surface, kind = %msg.kind, "IPC kind rejected");
            return;
        }
        if !self.permitted_kinds(surface).contains(&msg.kind.as_str()) {
            warn!(surface = %surface, kind = %msg.kind, "IPC kind not permitted for surface");
            return;
        }
        debug!(surface = %surface, kind = %msg.kind, "IPC dispatch");

        match msg.kind.as_str() {
            "rail_ready" => self.send_rail_state(),
            "switch_surface" => match surface_name(&msg.payload) {
                Some(name) => {
                    self.switch_to(&name);
                }
                None => warn!(surface = %surface, "switch_surface without a name"),
            },
            "reload" => {
                self.reload();
            }
            "profiles_list" => self.send_profiles(surface),
            "profile_create" => self.ipc_profile_create(surface, &msg.payload),
            "profile_update" => self.ipc_profile_update(surface, &msg.payload),
            "profile_delete" => self.ipc_profile_delete(surface, &msg.payload),
            "profile_switch" => self.ipc_profile_switch(surface, &msg.payload),
            "avatar_select" => self.ipc_avatar_select(&msg.payload),
            "unread_count" => self.ipc_unread_count(surface, &msg.payload),
            "show_notification" => self.ipc_show_notification(&msg.payload),
            other => warn!(kind = %other, "unhandled IPC kind"),
        }
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Best-effort send; a dead surface only costs a log line.
    pub(super) fn send_to(&self, surface: &str, kind: &str, payload: serde_json::Value) {
        if let Err(e) = self.registry.send(surface, kind, &payload) {
            debug!(surface = %surface, kind, error = %e, "IPC send dropped");
        }
    }

    pub(super) fn send_profiles(&self, surface: &str) {
        let payload = json!({
            "profiles": self.profiles.list_profiles(),
            "activeProfileId": self.profiles.active_id(),
        });
        self.send_to(surface, "profiles", payload);
    }

    /// Everything the rail needs to render itself.
    pub(super) fn send_rail_state(&mut self) {
        let apps: Vec<_> = self
            .registry
            .names()
            .into_iter()
            .filter(|n| *n != self.registry.settings_name())
            .map(|name| {
                let title = self
                    .config
                    .app(name)
                    .map(|a| a.title.clone())
                    .unwrap_or_default();
                json!({ "name": name, "title": title })
            })
            .collect();
        let payload = json!({
            "apps": apps,
            "active": self.registry.active(),
            "unread": self.unread,
        });
        self.notify_rail("rail_state", payload);
        self.notify_profile();
    }

    // =========================================================================
    // SETTINGS PROTOCOL
    // =========================================================================

    fn ipc_profile_create(&mut self, surface: &str, payload: &IpcPayload) {
        let Some(req) = parse::<CreatePayload>(payload) else {
            warn!("profile_create: malformed payload");
            return;
        };
        match self.profiles.create(&req.name, req.avatar_path) {
            Ok(profile) => {
                debug!(profile_id = %profile.id, "profile created");
                self.send_profiles(surface);
            }
            Err(e) => self.send_profile_error(surface, &e),
        }
    }

    fn ipc_profile_update(&mut self, surface: &str, payload: &IpcPayload) {
        let Some(req) = parse::<UpdatePayload>(payload) else {
            warn!("profile_update: malformed payload");
            return;
        };
        let apps_changed = req.update.disabled_apps.is_some();
        match self.profiles.update(&req.id, req.update) {
            Ok(profile) => {
                self.send_profiles(surface);
                if profile.id == self.profiles.active_id() {
                    if apps_changed {
                        self.rebuild_content();
                    } else {
                        self.notify_profile();
                    }
                }
            }
            Err(e) => self.send_profile_error(surface, &e),
        }
    }

    fn ipc_profile_delete(&mut self, surface: &str, payload: &IpcPayload) {
        let Some(IdPayload { id }) = parse::<IdPayload>(payload) else {
            warn!("profile_delete: malformed payload");
            return;
        };
        let was_active = self.profiles.active_id() == id;
        match self.profiles.delete(&id) {
            Ok(()) => {
                if was_active {
                    self.rebuild_content();
                }
                self.send_profiles(surface);
            }
            Err(e) => self.send_profile_error(surface, &e),
        }
    }

    fn ipc_profile_switch(&mut self, surface: &str, payload: &IpcPayload) {
        let Some(IdPayload { id }) = parse::<IdPayload>(payload) else {
            warn!("profile_switch: malformed payload");
            return;
        };
        if let Err(e) = self.switch_profile(&id) {
            let settings = self.registry.settings_name().to_string();
            let target = if self.registry.is_alive(surface) {
                surface.to_string()
            } else {
                settings
            };
            self.send_profile_error(&target, &e);
        }
    }

    fn ipc_avatar_select(&mut self, payload: &IpcPayload) {
        let id = parse::<IdPayload>(payload)
            .map(|p| p.id)
            .unwrap_or_else(|| self.profiles.active_id().to_string());
        self.shell.pick_avatar(&id);
    }

    // =========================================================================
    // CONTENT-SURFACE PROTOCOL
    // =========================================================================

    fn ipc_unread_count(&mut self, surface: &str, payload: &IpcPayload) {
        let Some(count) = payload.to_value().as_u64() else {
            warn!(surface = %surface, "unread_count must be a non-negative integer");
            return;
        };
        let previous = self.unread.insert(surface.to_string(), count);
        if previous == Some(count) {
            return;
        }
        self.notify_rail("unread_count", json!({ "surface": surface, "count": count }));
        self.refresh_title();
    }

    fn ipc_show_notification(&mut self, payload: &IpcPayload) {
        let Some(n) = parse::<NotificationPayload>(payload) else {
            warn!("show_notification: malformed payload");
            return;
        };
        self.shell.notify(&n.title, &n.body);
    }
}

fn parse<T: serde::de::DeserializeOwned>(payload: &IpcPayload) -> Option<T> {
    serde_json::from_value(payload.to_value()).ok()
}

/// `"gmail"` or `{"name": "gmail"}`.
fn surface_name(payload: &IpcPayload) -> Option<String> {
    if let Some(name) = payload.as_text() {
        return Some(name.to_string());
    }
    payload
        .to_value()
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
