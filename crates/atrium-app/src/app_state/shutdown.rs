//! Graceful shutdown: close windows, destroy webviews, stop the runtime.

use std::time::Duration;

use super::core::AtriumApp;

impl AtriumApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Auxiliary windows go first since their webviews share partition
    /// contexts with the main surfaces.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        self.close_all_auxiliary_windows();

        if let Some(ref mut host) = self.host {
            host.shutdown();
        }
        self.window = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use crate::app_state::core::AtriumApp;
    use atrium_config::AtriumConfig;
    use atrium_session::ProfileManager;

    fn app() -> AtriumApp {
        AtriumApp::new(AtriumConfig::default(), ProfileManager::in_memory(), None)
    }

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = app();
        app.shutdown();

        assert!(app.host.is_none());
        assert!(app.window.is_none());
        assert!(app.aux_windows.is_empty());
        assert!(app.tokio_runtime.is_none());
        assert!(app.should_exit);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = app();
        app.shutdown();
        app.shutdown();
        assert!(app.tokio_runtime.is_none());
    }
}
