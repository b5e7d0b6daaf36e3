//! Configuration schema types for Atrium.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod apps;
mod logging;
mod login_sync;
mod navigation;
mod window;

pub use apps::*;
pub use logging::*;
pub use login_sync::*;
pub use navigation::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Surface name reserved for the control rail.
pub const RAIL_SURFACE: &str = "rail";

/// Surface name reserved for the settings page.
pub const SETTINGS_SURFACE: &str = "settings";

/// Root configuration for Atrium.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AtriumConfig {
    pub window: WindowConfig,
    pub apps: Vec<AppConfig>,
    pub navigation: NavigationConfig,
    pub login_sync: LoginSyncConfig,
    pub logging: LoggingConfig,
}

impl Default for AtriumConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            apps: apps::default_apps(),
            navigation: NavigationConfig::default(),
            login_sync: LoginSyncConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AtriumConfig {
    /// Apps that should get a surface, in rail order.
    pub fn enabled_apps(&self) -> impl Iterator<Item = &AppConfig> {
        self.apps.iter().filter(|a| a.enabled)
    }

    pub fn app(&self, name: &str) -> Option<&AppConfig> {
        self.apps.iter().find(|a| a.name == name)
    }

    /// Every hostname that counts as a first-party remote app: the host of
    /// each configured app URL plus `navigation.extra_app_domains`.
    pub fn app_domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.apps.iter().filter_map(|a| a.host()).collect();
        for extra in &self.navigation.extra_app_domains {
            let extra = extra.to_ascii_lowercase();
            if !domains.contains(&extra) {
                domains.push(extra);
            }
        }
        domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_google_apps() {
        let config = AtriumConfig::default();
        let names: Vec<&str> = config.apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            ["gmail", "calendar", "drive", "docs", "chat", "meet"]
        );
        assert!(config.apps.iter().all(|a| a.enabled));
    }

    #[test]
    fn app_domains_include_app_hosts_and_extras() {
        let config = AtriumConfig::default();
        let domains = config.app_domains();
        assert!(domains.contains(&"mail.google.com".to_string()));
        assert!(domains.contains(&"calendar.google.com".to_string()));
        assert!(domains.contains(&"sheets.google.com".to_string()));
    }

    #[test]
    fn app_domains_are_deduplicated() {
        let mut config = AtriumConfig::default();
        config.navigation.extra_app_domains.push("MAIL.google.com".into());
        let count = config
            .app_domains()
            .iter()
            .filter(|d| *d == "mail.google.com")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn partial_toml_keeps_default_apps() {
        let config: AtriumConfig = toml::from_str("[window]\nwidth = 1000\n").unwrap();
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.apps.len(), 6);
    }

    #[test]
    fn apps_in_toml_replace_defaults() {
        let config: AtriumConfig = toml::from_str(
            r#"
[[apps]]
name = "mail"
title = "Mail"
url = "https://mail.example.com/"
"#,
        )
        .unwrap();
        assert_eq!(config.apps.len(), 1);
        assert_eq!(config.apps[0].name, "mail");
        assert!(config.apps[0].enabled);
        assert!(config.app("mail").is_some());
        assert!(config.app("gmail").is_none());
    }

    #[test]
    fn enabled_apps_skips_disabled() {
        let mut config = AtriumConfig::default();
        config.apps[1].enabled = false;
        let names: Vec<&str> = config.enabled_apps().map(|a| a.name.as_str()).collect();
        assert!(!names.contains(&"calendar"));
        assert_eq!(names.len(), 5);
    }
}
