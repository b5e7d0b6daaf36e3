use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebContext, WebViewBuilder};

use atrium_common::types::Rect;
use atrium_session::partition_dir;

use crate::backend::SurfaceError;
use crate::ipc::{CONTENT_INIT_SCRIPT, IPC_INIT_SCRIPT};
use crate::surface::{SurfaceKind, SurfaceSpec};

use super::handle::SurfaceHandle;
use super::{backend_error, handlers, rect_to_wry, PartitionContext, WryBackend};

/// Context key and storage partition for the rail, which belongs to no profile.
const RAIL_PARTITION: &str = "persist:rail";

/// Context key for `partition` (`None` = unpartitioned default).
pub(super) fn context_key(partition: Option<&str>) -> String {
    partition.unwrap_or("default").to_string()
}

impl<W: HasWindowHandle> WryBackend<W> {
    /// Create a child webview for `spec` inside the attached window.
    pub(super) fn build_surface(
        &mut self,
        spec: &SurfaceSpec,
        partition: Option<&str>,
        bounds: Rect,
    ) -> Result<(), SurfaceError> {
        if self.handles.contains_key(&spec.name) {
            return Err(SurfaceError::Backend {
                name: spec.name.clone(),
                message: "surface already exists".into(),
            });
        }
        let window = self
            .window
            .clone()
            .ok_or_else(|| SurfaceError::NoWindow(spec.name.clone()))?;

        // The rail keeps its own context so that only one `atrium://`
        // registration ever exists per context.
        let partition = if spec.kind == SurfaceKind::Rail {
            Some(RAIL_PARTITION)
        } else {
            partition
        };
        let key = context_key(partition);
        let current_url = Arc::new(Mutex::new(spec.url.clone()));

        let webview = {
            let builder = self.prepare_builder(&key, partition, spec, Arc::clone(&current_url));
            builder
                .with_bounds(rect_to_wry(bounds))
                .build_as_child(&*window)
                .map_err(|e| backend_error(&spec.name, e))?
        };

        if let Some(ctx) = self.contexts.get_mut(&key) {
            ctx.users += 1;
        }
        self.handles.insert(
            spec.name.clone(),
            SurfaceHandle {
                webview,
                name: spec.name.clone(),
                context_key: key,
                current_url,
            },
        );
        debug!(surface = %spec.name, kind = ?spec.kind, partition = ?partition, "surface created");
        Ok(())
    }

    /// Builder with context, handlers and initial URL for `spec`. The
    /// partition's `WebContext` is created on first use.
    pub(super) fn prepare_builder(
        &mut self,
        key: &str,
        partition: Option<&str>,
        spec: &SurfaceSpec,
        current_url: Arc<Mutex<String>>,
    ) -> WebViewBuilder<'_> {
        let events = Arc::clone(&self.events);
        let policy = Arc::clone(&self.policy);
        let provider = if spec.is_local() {
            self.content_provider.clone()
        } else {
            None
        };
        let user_agent = self.user_agent.clone();
        let data_dir = partition_dir(&self.partitions_root, partition);

        let ctx = self
            .contexts
            .entry(key.to_string())
            .or_insert_with(|| PartitionContext {
                context: WebContext::new(Some(data_dir)),
                users: 0,
            });

        let mut builder = WebViewBuilder::with_web_context(&mut ctx.context)
            .with_devtools(cfg!(debug_assertions))
            .with_clipboard(true)
            .with_focused(false)
            .with_url(spec.url.as_str());

        if let Some(ua) = &user_agent {
            builder = builder.with_user_agent(ua);
        }

        let name = spec.name.clone();
        builder = handlers::attach_navigation_handler(
            builder,
            Arc::clone(&events),
            policy,
            name.clone(),
            spec.url.clone(),
            Arc::clone(&current_url),
        );
        builder = handlers::attach_new_window_handler(builder, Arc::clone(&events), name.clone());
        builder =
            handlers::attach_page_load_handler(builder, Arc::clone(&events), name.clone(), current_url);

        builder = builder.with_initialization_script(IPC_INIT_SCRIPT);
        if spec.kind == SurfaceKind::App {
            builder = builder.with_initialization_script(CONTENT_INIT_SCRIPT);
        }
        builder = handlers::attach_ipc_handler(builder, events, name);
        if let Some(provider) = provider {
            builder = handlers::attach_custom_protocol(builder, provider);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_partition_key() {
        assert_eq!(context_key(None), "default");
        assert_eq!(context_key(Some("persist:profile-1")), "persist:profile-1");
    }
}
