use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::raw_window_handle::HasWindowHandle;

use crate::backend::SurfaceError;
use crate::surface::SurfaceSpec;

use super::handle::SurfaceHandle;
use super::lifecycle::context_key;
use super::{backend_error, WryBackend};

impl<W: HasWindowHandle> WryBackend<W> {
    /// Build a webview filling a separate top-level `window`, bound to
    /// `partition` and screened by the same navigation policy. Its events
    /// are tagged with `surface`. Hand the handle back through
    /// [`close_auxiliary`](Self::close_auxiliary) when the window closes.
    pub fn build_auxiliary<A: HasWindowHandle>(
        &mut self,
        window: &A,
        surface: &str,
        url: &str,
        partition: Option<&str>,
    ) -> Result<SurfaceHandle, SurfaceError> {
        let spec = SurfaceSpec::app(surface, url);
        let key = context_key(partition);
        let current_url = Arc::new(Mutex::new(url.to_string()));

        let webview = self
            .prepare_builder(&key, partition, &spec, Arc::clone(&current_url))
            .build(window)
            .map_err(|e| backend_error(surface, e))?;

        if let Some(ctx) = self.contexts.get_mut(&key) {
            ctx.users += 1;
        }
        debug!(surface = %surface, url = %url, "auxiliary webview created");
        Ok(SurfaceHandle {
            webview,
            name: surface.to_string(),
            context_key: key,
            current_url,
        })
    }

    pub fn close_auxiliary(&mut self, handle: SurfaceHandle) {
        let key = handle.context_key().to_string();
        let name = handle.name().to_string();
        drop(handle);
        self.release_context(&key);
        debug!(surface = %name, "auxiliary webview closed");
    }
}
