//! Login-sync restart: new main window, every surface rebuilt.

use std::sync::Arc;
use std::time::Instant;

use winit::event_loop::ActiveEventLoop;

use super::core::AtriumApp;
use super::init::{binding_for, create_main_window};

impl AtriumApp {
    /// Close auxiliary windows, then let the host tear down and rebuild its
    /// surfaces in a freshly created main window.
    pub(super) fn restart_surfaces(&mut self, event_loop: &ActiveEventLoop, now: Instant) {
        self.close_all_auxiliary_windows();

        let Some(host) = self.host.as_mut() else {
            return;
        };
        let window_slot = &mut self.window;
        let config = &self.config;

        let done = host.restart(now, |backend| {
            // The host released the backend's handle; dropping ours closes it.
            *window_slot = None;
            let window = create_main_window(event_loop, config)?;
            backend.attach_window(Arc::clone(&window));
            let binding = binding_for(&window);
            *window_slot = Some(window);
            Some(binding)
        });

        if !done && self.window.is_none() {
            tracing::error!("Main window lost during restart, exiting");
            self.should_exit = true;
        }
    }
}
