//! Auxiliary top-level windows for app links opened outside the rail.

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use atrium_webview::manager::SurfaceHandle;

use super::core::AtriumApp;

const AUX_WIDTH: f64 = 1100.0;
const AUX_HEIGHT: f64 = 760.0;

/// An auxiliary window and the webview filling it.
pub(crate) struct AuxWindow {
    // Declared first so the webview drops before its window
    handle: SurfaceHandle,
    _window: Arc<Window>,
}

/// Surface name carried by the events of auxiliary window `n`.
pub(super) fn aux_surface_name(n: u64) -> String {
    format!("aux-{n}")
}

impl AtriumApp {
    pub(super) fn open_auxiliary_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        url: &str,
        partition: Option<&str>,
    ) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(LogicalSize::new(AUX_WIDTH, AUX_HEIGHT));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::warn!("Failed to create auxiliary window: {e}");
                return;
            }
        };

        let surface = aux_surface_name(self.next_aux_id);
        self.next_aux_id += 1;

        match host
            .backend_mut()
            .build_auxiliary(&*window, &surface, url, partition)
        {
            Ok(handle) => {
                tracing::info!("Opened {surface} for {url}");
                self.aux_windows.insert(
                    window.id(),
                    AuxWindow {
                        handle,
                        _window: window,
                    },
                );
            }
            Err(e) => tracing::warn!("Failed to build auxiliary webview: {e}"),
        }
    }

    pub(super) fn close_auxiliary_window(&mut self, id: WindowId) {
        let Some(aux) = self.aux_windows.remove(&id) else {
            return;
        };
        match self.host.as_mut() {
            Some(host) => host.backend_mut().close_auxiliary(aux.handle),
            None => drop(aux),
        }
    }

    pub(super) fn close_all_auxiliary_windows(&mut self) {
        let ids: Vec<WindowId> = self.aux_windows.keys().copied().collect();
        for id in ids {
            self.close_auxiliary_window(id);
        }
    }
}
