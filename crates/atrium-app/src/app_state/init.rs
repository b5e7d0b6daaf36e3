//! Window creation and host setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use atrium_common::types::Rect;
use atrium_config::AtriumConfig;
use atrium_host::{Host, ScriptAvatarProbe, WindowBinding};
use atrium_navigation::NavigationPolicy;
use atrium_webview::{ContentProvider, WryBackend};

use super::core::AtriumApp;
use super::shell::AppShell;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Relative path from the binary to optional on-disk local assets.
const ASSETS_DIR: &str = "assets";

const RAIL_HTML: &str = include_str!("../../../../assets/rail/index.html");
const SETTINGS_HTML: &str = include_str!("../../../../assets/settings/index.html");

// =============================================================================
// HELPERS
// =============================================================================

/// Open the main window sized from config.
pub(super) fn create_main_window(
    event_loop: &ActiveEventLoop,
    config: &AtriumConfig,
) -> Option<Arc<Window>> {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.as_str())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ));

    match event_loop.create_window(attrs) {
        Ok(w) => Some(Arc::new(w)),
        Err(e) => {
            tracing::error!("Failed to create window: {e}");
            None
        }
    }
}

/// The window's identity token and logical content bounds.
pub(super) fn binding_for(window: &Window) -> WindowBinding {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    WindowBinding {
        token: u64::from(window.id()),
        bounds: Rect::sized(size.width, size.height),
    }
}

/// Local pages: bundled rail and settings, anything else from [`ASSETS_DIR`].
pub(super) fn content_provider() -> ContentProvider {
    let mut provider = ContentProvider::new(ASSETS_DIR);
    provider.add_override("rail/index.html", "text/html", RAIL_HTML.as_bytes());
    provider.add_override(
        "settings/index.html",
        "text/html",
        SETTINGS_HTML.as_bytes(),
    );
    provider
}

// =============================================================================
// INITIALIZATION
// =============================================================================

impl AtriumApp {
    /// Create the window, the webview backend and the host, then build every
    /// surface. Returns `false` if the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let Some(profiles) = self.profiles.take() else {
            tracing::error!("Profiles already consumed, cannot initialize twice");
            return false;
        };
        let Some(window) = create_main_window(event_loop, &self.config) else {
            return false;
        };

        let partitions_root = match atrium_platform::partitions_dir() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!("No partition storage directory: {e}");
                return false;
            }
        };

        let policy = NavigationPolicy::from_config(&self.config);
        let mut backend = WryBackend::new(policy, partitions_root);
        backend.set_content_provider(content_provider());
        backend.set_user_agent(self.config.window.user_agent.clone());
        backend.attach_window(Arc::clone(&window));

        let mut host = Host::new(self.config.clone(), profiles, backend, AppShell::default())
            .with_avatar_probe(Box::new(ScriptAvatarProbe));

        let binding = binding_for(&window);
        if let Err(e) = host.start(binding, self.initial_surface.as_deref()) {
            tracing::error!("Failed to build surfaces: {e}");
            return false;
        }
        tracing::info!(
            "Window ready ({} surfaces)",
            host.registry().names().len()
        );

        self.window = Some(window);
        self.host = Some(host);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_pages_are_served() {
        let provider = content_provider();
        let (mime, data) = provider.resolve("rail/index.html").unwrap();
        assert_eq!(mime.as_ref(), "text/html");
        assert!(std::str::from_utf8(&data).unwrap().contains("rail_ready"));

        let (_, data) = provider.resolve("/settings/index.html?v=1").unwrap();
        assert!(std::str::from_utf8(&data).unwrap().contains("profiles_list"));
    }

    #[test]
    fn bundled_pages_use_the_ipc_bridge() {
        assert!(RAIL_HTML.contains("window.atrium.ipc"));
        assert!(SETTINGS_HTML.contains("window.atrium.ipc"));
    }
}
