use std::sync::{Arc, Mutex};

use wry::WebView;

use crate::backend::SurfaceError;

use super::backend_error;

/// A live webview plus what the backend tracks about it.
pub struct SurfaceHandle {
    pub(super) webview: WebView,
    pub(super) name: String,
    /// Key into the backend's partition contexts.
    pub(super) context_key: String,
    /// Last landed URL, shared with the navigation handler.
    pub(super) current_url: Arc<Mutex<String>>,
}

impl SurfaceHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context_key(&self) -> &str {
        &self.context_key
    }

    /// Best-effort current URL.
    pub fn current_url(&self) -> String {
        self.current_url
            .lock()
            .map(|u| u.clone())
            .unwrap_or_default()
    }

    pub fn load_url(&self, url: &str) -> Result<(), SurfaceError> {
        if let Ok(mut current) = self.current_url.lock() {
            *current = url.to_string();
        }
        self.webview
            .load_url(url)
            .map_err(|e| backend_error(&self.name, e))
    }

    pub fn reload(&self) -> Result<(), SurfaceError> {
        self.webview.reload().map_err(|e| backend_error(&self.name, e))
    }

    /// Send a typed IPC message to JavaScript.
    pub fn send_ipc(&self, kind: &str, payload: &serde_json::Value) -> Result<(), SurfaceError> {
        let script = crate::ipc::js_dispatch_message(kind, payload);
        self.webview
            .evaluate_script(&script)
            .map_err(|e| backend_error(&self.name, e))
    }

    pub fn evaluate_with_callback(
        &self,
        script: &str,
        callback: impl Fn(String) + Send + 'static,
    ) -> Result<(), SurfaceError> {
        self.webview
            .evaluate_script_with_callback(script, callback)
            .map_err(|e| backend_error(&self.name, e))
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), SurfaceError> {
        self.webview
            .set_bounds(bounds)
            .map_err(|e| backend_error(&self.name, e))
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), SurfaceError> {
        self.webview
            .set_visible(visible)
            .map_err(|e| backend_error(&self.name, e))
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}
