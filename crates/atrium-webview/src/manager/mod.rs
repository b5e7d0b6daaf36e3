//! `wry` implementation of [`SurfaceBackend`].
//!
//! `WryBackend` creates child webviews inside one host window. Every
//! partition gets its own `WebContext` rooted at a per-partition data
//! directory, so cookies and storage never cross profiles.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::WebContext;

use atrium_common::types::Rect;
use atrium_navigation::NavigationPolicy;

use crate::backend::{SurfaceBackend, SurfaceError};
use crate::content::ContentProvider;
use crate::events::{ScriptTag, SurfaceEvent};
use crate::surface::SurfaceSpec;

mod auxiliary;
mod handle;
pub mod handlers;
mod lifecycle;

pub use handle::SurfaceHandle;

/// Storage context shared by every surface bound to one partition.
struct PartitionContext {
    context: WebContext,
    users: usize,
}

pub struct WryBackend<W: HasWindowHandle> {
    window: Option<Arc<W>>,
    /// Event sink; pushed from webview callbacks, drained by the event loop.
    pub(crate) events: Arc<Mutex<Vec<SurfaceEvent>>>,
    policy: Arc<NavigationPolicy>,
    content_provider: Option<Arc<ContentProvider>>,
    partitions_root: PathBuf,
    contexts: HashMap<String, PartitionContext>,
    handles: HashMap<String, SurfaceHandle>,
    user_agent: Option<String>,
}

impl<W: HasWindowHandle> WryBackend<W> {
    pub fn new(policy: NavigationPolicy, partitions_root: impl Into<PathBuf>) -> Self {
        Self {
            window: None,
            events: Arc::new(Mutex::new(Vec::new())),
            policy: Arc::new(policy),
            content_provider: None,
            partitions_root: partitions_root.into(),
            contexts: HashMap::new(),
            handles: HashMap::new(),
            user_agent: None,
        }
    }

    /// Attach the host window new surfaces are created in.
    pub fn attach_window(&mut self, window: Arc<W>) {
        self.window = Some(window);
    }

    pub fn window(&self) -> Option<&Arc<W>> {
        self.window.as_ref()
    }

    /// Set the content provider for serving bundled pages via `atrium://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    pub fn set_user_agent(&mut self, user_agent: Option<String>) {
        self.user_agent = user_agent;
    }

    pub fn policy(&self) -> &Arc<NavigationPolicy> {
        &self.policy
    }

    fn handle(&self, name: &str) -> Result<&SurfaceHandle, SurfaceError> {
        self.handles
            .get(name)
            .ok_or_else(|| SurfaceError::Unknown(name.to_string()))
    }

    fn push_event(&self, event: SurfaceEvent) {
        if let Ok(mut evts) = self.events.lock() {
            evts.push(event);
        }
    }

    /// Drop a partition's context once its last surface is gone.
    fn release_context(&mut self, key: &str) {
        let Some(ctx) = self.contexts.get_mut(key) else {
            return;
        };
        ctx.users = ctx.users.saturating_sub(1);
        if ctx.users == 0 {
            self.contexts.remove(key);
            debug!(partition = %key, "storage context released");
        }
    }
}

/// Map a wry error on surface `name` into a `SurfaceError`.
pub(crate) fn backend_error(name: &str, e: wry::Error) -> SurfaceError {
    SurfaceError::Backend {
        name: name.to_string(),
        message: e.to_string(),
    }
}

/// Convert a layout rect to wry bounds in logical pixels.
pub fn rect_to_wry(rect: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            rect.width.max(0.0),
            rect.height.max(0.0),
        )),
    }
}

impl<W: HasWindowHandle> SurfaceBackend for WryBackend<W> {
    fn create(
        &mut self,
        spec: &SurfaceSpec,
        partition: Option<&str>,
        bounds: Rect,
    ) -> Result<(), SurfaceError> {
        self.build_surface(spec, partition, bounds)
    }

    fn destroy(&mut self, name: &str) -> Result<(), SurfaceError> {
        let handle = self
            .handles
            .remove(name)
            .ok_or_else(|| SurfaceError::Destroyed(name.to_string()))?;
        let key = handle.context_key().to_string();
        drop(handle);
        self.release_context(&key);
        debug!(surface = %name, "surface destroyed");
        self.push_event(SurfaceEvent::Closed {
            surface: name.to_string(),
        });
        Ok(())
    }

    fn set_bounds(&mut self, name: &str, bounds: Rect) -> Result<(), SurfaceError> {
        self.handle(name)?.set_bounds(rect_to_wry(bounds))
    }

    fn set_visible(&mut self, name: &str, visible: bool) -> Result<(), SurfaceError> {
        self.handle(name)?.set_visible(visible)
    }

    fn reload(&mut self, name: &str) -> Result<(), SurfaceError> {
        self.handle(name)?.reload()
    }

    fn load_url(&mut self, name: &str, url: &str) -> Result<(), SurfaceError> {
        self.handle(name)?.load_url(url)
    }

    fn current_url(&self, name: &str) -> Option<String> {
        self.handles.get(name).map(SurfaceHandle::current_url)
    }

    fn send_ipc(
        &self,
        name: &str,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SurfaceError> {
        self.handle(name)?.send_ipc(kind, payload)
    }

    fn evaluate(&self, name: &str, script: &str, tag: ScriptTag) -> Result<(), SurfaceError> {
        let events = Arc::clone(&self.events);
        let surface = name.to_string();
        self.handle(name)?.evaluate_with_callback(script, move |value| {
            if let Ok(mut evts) = events.lock() {
                evts.push(SurfaceEvent::ScriptResult {
                    surface: surface.clone(),
                    tag,
                    value,
                });
            }
        })
    }

    fn release_window(&mut self) {
        if !self.handles.is_empty() {
            warn!(
                count = self.handles.len(),
                "releasing window with live surfaces"
            );
            self.handles.clear();
            self.contexts.clear();
        }
        self.window = None;
    }

    fn drain_events(&self) -> Vec<SurfaceEvent> {
        self.events
            .lock()
            .map(|mut evts| std::mem::take(&mut *evts))
            .unwrap_or_default()
    }
}
