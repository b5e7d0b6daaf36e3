//! Login detection and restart timing.

use serde::{Deserialize, Serialize};

/// Pages that sit between the sign-in form and the app (assertion consumer
/// endpoints, cookie-staging redirects). Every field that is set must match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct IntermediatePattern {
    pub host: Option<String>,
    pub path_prefix: Option<String>,
    pub path_contains: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSyncConfig {
    pub enabled: bool,
    /// Wait after a detected login before restarting, so in-flight
    /// redirects and cookie writes can finish.
    pub settle_delay_ms: u64,
    /// How long the restart guard stays set after a restart completes.
    pub cooldown_ms: u64,
    /// Hosts whose pages mean "the user is signing in".
    pub auth_domains: Vec<String>,
    pub intermediate: Vec<IntermediatePattern>,
}

impl Default for LoginSyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settle_delay_ms: 1500,
            cooldown_ms: 5000,
            auth_domains: vec![
                "accounts.google.com".into(),
                "accounts.youtube.com".into(),
            ],
            intermediate: vec![
                IntermediatePattern {
                    host: Some("accounts.youtube.com".into()),
                    ..Default::default()
                },
                IntermediatePattern {
                    path_prefix: Some("/accounts/".into()),
                    ..Default::default()
                },
                IntermediatePattern {
                    path_contains: Some("/acs".into()),
                    ..Default::default()
                },
                IntermediatePattern {
                    path_contains: Some("/saml".into()),
                    ..Default::default()
                },
                IntermediatePattern {
                    host: Some("www.google.com".into()),
                    ..Default::default()
                },
            ],
        }
    }
}
