use serde::{Deserialize, Serialize};

/// Bundled page for the control rail.
pub const RAIL_URL: &str = "atrium://localhost/rail/index.html";

/// Bundled page for the settings surface.
pub const SETTINGS_URL: &str = "atrium://localhost/settings/index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// A remote web application.
    App,
    /// The local settings page.
    Settings,
    /// The always-visible navigation strip.
    Rail,
}

/// Everything needed to create one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub name: String,
    pub kind: SurfaceKind,
    pub url: String,
}

impl SurfaceSpec {
    pub fn app(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SurfaceKind::App,
            url: url.into(),
        }
    }

    pub fn settings(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SurfaceKind::Settings,
            url: SETTINGS_URL.to_string(),
        }
    }

    pub fn rail(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SurfaceKind::Rail,
            url: RAIL_URL.to_string(),
        }
    }

    pub fn is_settings_surface(&self) -> bool {
        self.kind == SurfaceKind::Settings
    }

    /// Local pages get the `atrium://` protocol; remote apps never do.
    pub fn is_local(&self) -> bool {
        self.kind != SurfaceKind::App
    }
}
