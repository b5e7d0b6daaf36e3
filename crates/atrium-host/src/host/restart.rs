//! The login-sync restart: full teardown and rebuild of window and surfaces.

use std::time::Instant;

use tracing::{info, warn};

use atrium_common::new_correlation_id;
use atrium_webview::SurfaceBackend;

use crate::shell::Shell;

use super::{Host, WindowBinding};

impl<B: SurfaceBackend, S: Shell> Host<B, S> {
    /// Fire due login-sync timers. Returns `true` when the scheduled
    /// restart should run now (call [`restart`](Self::restart)).
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        self.login_sync.poll(now)
    }

    /// Tear down every surface, the rail and the window; `reopen` creates
    /// and attaches a fresh window to the backend and returns its binding.
    /// Then rebuild everything for the active profile and restore the
    /// previous selection.
    ///
    /// A no-op when no window exists. Always ends the restart sequence, so
    /// the guard starts its cool-down whatever happens here.
    pub fn restart<F>(&mut self, now: Instant, reopen: F) -> bool
    where
        F: FnOnce(&mut B) -> Option<WindowBinding>,
    {
        let done = self.run_restart(reopen);
        self.login_sync.restart_finished(now);
        done
    }

    fn run_restart<F>(&mut self, reopen: F) -> bool
    where
        F: FnOnce(&mut B) -> Option<WindowBinding>,
    {
        if self.window.is_none() {
            info!("restart skipped: no window");
            return false;
        }
        let selected = self.selected.clone();
        let restart_id = new_correlation_id();
        info!(restart = %restart_id, selected = ?selected, "restarting surfaces");

        self.teardown();

        let Some(binding) = reopen(self.registry.backend_mut()) else {
            warn!(restart = %restart_id, "restart: window could not be recreated");
            return false;
        };
        self.attach_window(binding);

        if let Err(e) = self.build_all(selected.as_deref()) {
            warn!(restart = %restart_id, error = %e, "restart: failed to rebuild surfaces");
            return false;
        }
        self.refresh_title();
        info!(restart = %restart_id, active = ?self.selected, "restart complete");
        true
    }

    /// Destroy every surface and the rail and let go of the window. Used on
    /// application exit; safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.teardown();
        self.login_sync.reset_trackers();
        info!("surfaces shut down");
    }

    fn teardown(&mut self) {
        self.registry.destroy_all();
        self.registry.destroy_rail();
        self.detach_window();
        self.registry.backend_mut().release_window();
        self.unread.clear();
        self.prompts.clear();
        self.avatar_lookups.clear();
    }
}
