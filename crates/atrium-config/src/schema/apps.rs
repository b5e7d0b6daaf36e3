//! Remote app definitions: one content surface per enabled app.

use serde::{Deserialize, Serialize};

/// A remote web application hosted in its own surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Stable surface name used by the rail and IPC (`"gmail"`).
    pub name: String,
    /// Human-readable label shown in the rail.
    #[serde(default)]
    pub title: String,
    /// URL loaded when the surface is created.
    pub url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl AppConfig {
    pub fn new(name: &str, title: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            enabled: true,
        }
    }

    /// Lowercased hostname of `url`, if it parses.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()?
            .host_str()
            .map(|h| h.to_ascii_lowercase())
    }
}

fn default_true() -> bool {
    true
}

pub(crate) fn default_apps() -> Vec<AppConfig> {
    vec![
        AppConfig::new("gmail", "Gmail", "https://mail.google.com/mail/u/0/"),
        AppConfig::new("calendar", "Calendar", "https://calendar.google.com/calendar/u/0/r"),
        AppConfig::new("drive", "Drive", "https://drive.google.com/drive/u/0/my-drive"),
        AppConfig::new("docs", "Docs", "https://docs.google.com/document/u/0/"),
        AppConfig::new("chat", "Chat", "https://chat.google.com/u/0/"),
        AppConfig::new("meet", "Meet", "https://meet.google.com/"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_is_lowercased() {
        let app = AppConfig::new("x", "X", "https://Mail.Google.com/mail/");
        assert_eq!(app.host().as_deref(), Some("mail.google.com"));
    }

    #[test]
    fn host_of_garbage_url_is_none() {
        let app = AppConfig::new("x", "X", "not a url");
        assert!(app.host().is_none());
    }
}
