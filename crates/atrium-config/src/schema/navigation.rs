//! Navigation policy allow-lists.

use serde::{Deserialize, Serialize};

/// A URL shape whose real destination is carried in a query parameter,
/// e.g. `https://www.google.com/url?q=<target>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedirectorConfig {
    pub host: String,
    /// Exact path of the redirect endpoint.
    pub path: String,
    /// Query parameters tried in order for the wrapped target.
    pub params: Vec<String>,
}

/// Hostname allow-lists consumed by the navigation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Authentication / SSO hosts that may load in place.
    pub auth_domains: Vec<String>,
    /// First-party hosts beyond the configured app URLs.
    pub extra_app_domains: Vec<String>,
    pub redirectors: Vec<RedirectorConfig>,
    /// How many nested redirector wrappings are unwrapped (valid range: 1-8).
    pub max_redirect_depth: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            auth_domains: vec![
                "accounts.google.com".into(),
                "accounts.youtube.com".into(),
            ],
            extra_app_domains: vec![
                "sheets.google.com".into(),
                "slides.google.com".into(),
                "contacts.google.com".into(),
                "keep.google.com".into(),
            ],
            redirectors: vec![
                RedirectorConfig {
                    host: "www.google.com".into(),
                    path: "/url".into(),
                    params: vec!["q".into(), "url".into()],
                },
                RedirectorConfig {
                    host: "google.com".into(),
                    path: "/url".into(),
                    params: vec!["q".into(), "url".into()],
                },
            ],
            max_redirect_depth: 3,
        }
    }
}
