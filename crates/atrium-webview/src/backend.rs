//! The seam between surface bookkeeping and the web engine.

use atrium_common::types::Rect;

use crate::events::{ScriptTag, SurfaceEvent};
use crate::surface::SurfaceSpec;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("no window to attach surface '{0}' to")]
    NoWindow(String),

    #[error("unknown surface '{0}'")]
    Unknown(String),

    #[error("surface '{0}' is already destroyed")]
    Destroyed(String),

    #[error("surface '{name}': {message}")]
    Backend { name: String, message: String },
}

impl From<SurfaceError> for atrium_common::AtriumError {
    fn from(e: SurfaceError) -> Self {
        atrium_common::AtriumError::Surface(e.to_string())
    }
}

/// Operations the registry needs from a web engine. Names are unique per
/// live surface; a name may be reused after `destroy`.
pub trait SurfaceBackend {
    /// Create a surface inside the current window, bound to the storage
    /// namespace `partition` (`None` = unpartitioned).
    fn create(
        &mut self,
        spec: &SurfaceSpec,
        partition: Option<&str>,
        bounds: Rect,
    ) -> Result<(), SurfaceError>;

    /// Tear down a surface. Destroying a name that is not live returns
    /// `SurfaceError::Destroyed`.
    fn destroy(&mut self, name: &str) -> Result<(), SurfaceError>;

    fn set_bounds(&mut self, name: &str, bounds: Rect) -> Result<(), SurfaceError>;

    fn set_visible(&mut self, name: &str, visible: bool) -> Result<(), SurfaceError>;

    fn reload(&mut self, name: &str) -> Result<(), SurfaceError>;

    fn load_url(&mut self, name: &str, url: &str) -> Result<(), SurfaceError>;

    /// Best-effort current URL of a live surface.
    fn current_url(&self, name: &str) -> Option<String>;

    /// Send a typed IPC message to the page's JavaScript.
    fn send_ipc(
        &self,
        name: &str,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SurfaceError>;

    /// Evaluate `script`; the result arrives later as
    /// `SurfaceEvent::ScriptResult` tagged with `tag`.
    fn evaluate(&self, name: &str, script: &str, tag: ScriptTag) -> Result<(), SurfaceError>;

    /// Give up the window; every later `create` fails with `NoWindow` until
    /// a new one is attached.
    fn release_window(&mut self);

    /// Drain all pending events.
    fn drain_events(&self) -> Vec<SurfaceEvent>;
}
