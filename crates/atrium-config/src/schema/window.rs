//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Main window appearance and geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title. Unread totals are appended at runtime.
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
    /// Width of the always-visible control rail (valid range: 32-400).
    pub rail_width: u32,
    /// User agent for every webview. `None` keeps the engine's default.
    pub user_agent: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Atrium".into(),
            width: 1280,
            height: 800,
            rail_width: 72,
            user_agent: None,
        }
    }
}
