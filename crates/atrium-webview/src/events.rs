//! Surface event types.

use serde::{Deserialize, Serialize};

use atrium_navigation::NavigationDecision;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Why a script was evaluated; routes the asynchronous result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptTag {
    /// Profile picture extraction, carrying the lookup's ticket.
    Avatar(u64),
}

/// Events emitted by surfaces, queued for the main event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Page load state changed. Carries the landed URL.
    PageLoad {
        surface: String,
        state: PageLoadState,
        url: String,
    },
    /// An IPC message was received from JavaScript.
    IpcMessage { surface: String, body: String },
    /// An in-place navigation was refused by the policy.
    NavigationDenied {
        surface: String,
        url: String,
        decision: NavigationDecision,
        /// Redirector-unwrapped destination to act on.
        target: String,
    },
    /// The page asked for a secondary window. No window was created.
    NewWindowRequested { surface: String, url: String },
    /// Result of `SurfaceBackend::evaluate` (JSON-encoded).
    ScriptResult {
        surface: String,
        tag: ScriptTag,
        value: String,
    },
    /// Surface was destroyed.
    Closed { surface: String },
}

impl SurfaceEvent {
    pub fn surface(&self) -> &str {
        match self {
            Self::PageLoad { surface, .. }
            | Self::IpcMessage { surface, .. }
            | Self::NavigationDenied { surface, .. }
            | Self::NewWindowRequested { surface, .. }
            | Self::ScriptResult { surface, .. }
            | Self::Closed { surface } => surface,
        }
    }
}
