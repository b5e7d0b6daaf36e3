//! Named surfaces, their visibility and z-order.
//!
//! `SurfaceRegistry` is the higher-level owner over a [`SurfaceBackend`]:
//! it remembers which surfaces are alive, which one is shown, and the order
//! they were stacked in. Exactly one content surface is visible at a time
//! and the rail is always stacked last (topmost).

use tracing::{debug, info, warn};

use atrium_common::types::Rect;
use atrium_layout::SurfaceLayout;

use crate::backend::{SurfaceBackend, SurfaceError};
use crate::events::{ScriptTag, SurfaceEvent};
use crate::surface::SurfaceSpec;

pub struct SurfaceRegistry<B: SurfaceBackend> {
    backend: B,
    rail_name: String,
    settings_name: String,
    /// Live content surfaces (apps + settings), in creation order.
    content: Vec<SurfaceSpec>,
    rail_alive: bool,
    partition: Option<String>,
    active: Option<String>,
    /// Bottom-to-top stacking order of visible surfaces.
    display: Vec<String>,
}

impl<B: SurfaceBackend> SurfaceRegistry<B> {
    pub fn new(backend: B, rail_name: impl Into<String>, settings_name: impl Into<String>) -> Self {
        Self {
            backend,
            rail_name: rail_name.into(),
            settings_name: settings_name.into(),
            content: Vec::new(),
            rail_alive: false,
            partition: None,
            active: None,
            display: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn rail_name(&self) -> &str {
        &self.rail_name
    }

    pub fn settings_name(&self) -> &str {
        &self.settings_name
    }

    /// Partition the current content surfaces are bound to.
    pub fn partition(&self) -> Option<&str> {
        self.partition.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Visible surfaces, bottom to top.
    pub fn display_order(&self) -> &[String] {
        &self.display
    }

    /// Names of live content surfaces, in creation order.
    pub fn names(&self) -> Vec<&str> {
        self.content.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.content.iter().any(|s| s.name == name)
    }

    /// Whether `name` is live (content surface or rail).
    pub fn is_alive(&self, name: &str) -> bool {
        self.contains(name) || (self.rail_alive && name == self.rail_name)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Create one hidden surface per app plus the settings surface, all bound
    /// to `partition`. Fails only when there is no window; individual
    /// creation failures are logged and skipped.
    pub fn create_all(
        &mut self,
        apps: &[SurfaceSpec],
        partition: Option<&str>,
        content: Rect,
    ) -> Result<usize, SurfaceError> {
        let settings = SurfaceSpec::settings(self.settings_name.clone());
        let specs = apps
            .iter()
            .filter(|s| s.name != self.settings_name && s.name != self.rail_name)
            .cloned()
            .chain(std::iter::once(settings));

        self.partition = partition.map(str::to_string);
        let mut created = 0;
        for spec in specs {
            if self.contains(&spec.name) {
                warn!(surface = %spec.name, "surface already exists, skipping");
                continue;
            }
            match self.backend.create(&spec, partition, content) {
                Ok(()) => {
                    if let Err(e) = self.backend.set_visible(&spec.name, false) {
                        warn!(surface = %spec.name, error = %e, "failed to hide new surface");
                    }
                    self.content.push(spec);
                    created += 1;
                }
                Err(e @ SurfaceError::NoWindow(_)) => return Err(e),
                Err(e) => warn!(surface = %spec.name, error = %e, "failed to create surface"),
            }
        }
        info!(created, partition = ?partition, "surfaces created");
        Ok(created)
    }

    /// Create the control rail (unpartitioned).
    pub fn create_rail(&mut self, bounds: Rect) -> Result<(), SurfaceError> {
        if self.rail_alive {
            return Ok(());
        }
        let spec = SurfaceSpec::rail(self.rail_name.clone());
        self.backend.create(&spec, None, bounds)?;
        self.rail_alive = true;
        debug!(surface = %self.rail_name, "rail created");
        Ok(())
    }

    /// Hide every content surface and show `name`, then re-stack the rail on
    /// top. Unknown names are logged and leave the display unchanged.
    pub fn show_only(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            warn!(surface = %name, "show_only: unknown surface");
            return false;
        }

        for spec in &self.content {
            if spec.name != name {
                if let Err(e) = self.backend.set_visible(&spec.name, false) {
                    warn!(surface = %spec.name, error = %e, "failed to hide surface");
                }
            }
        }
        self.display.clear();

        if let Err(e) = self.backend.set_visible(name, true) {
            warn!(surface = %name, error = %e, "failed to show surface");
        }
        self.display.push(name.to_string());

        if self.rail_alive {
            if let Err(e) = self.backend.set_visible(&self.rail_name, true) {
                warn!(surface = %self.rail_name, error = %e, "failed to show rail");
            }
            self.display.push(self.rail_name.clone());
        }

        self.active = Some(name.to_string());
        debug!(surface = %name, "surface shown");
        true
    }

    /// Destroy every content surface. Best-effort: errors are logged and
    /// the remaining surfaces are still destroyed.
    pub fn destroy_all(&mut self) {
        let specs = std::mem::take(&mut self.content);
        for spec in &specs {
            if let Err(e) = self.backend.destroy(&spec.name) {
                warn!(surface = %spec.name, error = %e, "error while destroying surface");
            }
        }
        self.display.retain(|n| n == &self.rail_name);
        self.active = None;
        self.partition = None;
        info!(count = specs.len(), "surfaces destroyed");
    }

    /// Destroy the rail. Errors are logged.
    pub fn destroy_rail(&mut self) {
        if !self.rail_alive {
            return;
        }
        if let Err(e) = self.backend.destroy(&self.rail_name) {
            warn!(surface = %self.rail_name, error = %e, "error while destroying rail");
        }
        self.rail_alive = false;
        self.display.retain(|n| n != &self.rail_name);
    }

    /// Position the rail and size every content surface to the content
    /// region, so hidden surfaces are already correct when shown.
    pub fn apply_layout(&mut self, layout: &SurfaceLayout) {
        if self.rail_alive {
            if let Err(e) = self.backend.set_bounds(&self.rail_name, layout.rail) {
                warn!(error = %e, "failed to position rail");
            }
        }
        for spec in &self.content {
            if let Err(e) = self.backend.set_bounds(&spec.name, layout.content) {
                warn!(surface = %spec.name, error = %e, "failed to position surface");
            }
        }
    }

    // =========================================================================
    // PER-SURFACE OPERATIONS
    // =========================================================================

    pub fn reload(&mut self, name: &str) -> Result<(), SurfaceError> {
        self.ensure_alive(name)?;
        self.backend.reload(name)
    }

    pub fn load_url(&mut self, name: &str, url: &str) -> Result<(), SurfaceError> {
        self.ensure_alive(name)?;
        self.backend.load_url(name, url)
    }

    pub fn current_url(&self, name: &str) -> Option<String> {
        if !self.is_alive(name) {
            return None;
        }
        self.backend.current_url(name)
    }

    /// The URL a content surface was created with.
    pub fn home_url(&self, name: &str) -> Option<&str> {
        self.content
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.url.as_str())
    }

    /// Send an IPC message; a dead target is an error, not a crash.
    pub fn send(
        &self,
        name: &str,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SurfaceError> {
        self.ensure_alive(name)?;
        self.backend.send_ipc(name, kind, payload)
    }

    pub fn evaluate(&self, name: &str, script: &str, tag: ScriptTag) -> Result<(), SurfaceError> {
        self.ensure_alive(name)?;
        self.backend.evaluate(name, script, tag)
    }

    pub fn drain_events(&self) -> Vec<SurfaceEvent> {
        self.backend.drain_events()
    }

    fn ensure_alive(&self, name: &str) -> Result<(), SurfaceError> {
        if self.is_alive(name) {
            Ok(())
        } else {
            Err(SurfaceError::Unknown(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests;
