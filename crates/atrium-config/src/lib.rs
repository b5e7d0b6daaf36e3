//! Atrium configuration system.
//!
//! TOML-based configuration for the window, the hosted remote apps, the
//! navigation allow-lists and the login-sync timings. All config sections
//! use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use atrium_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{} apps configured", config.apps.len());
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AtriumConfig, CONFIG_SCHEMA_VERSION};

use atrium_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<AtriumConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<AtriumConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AtriumConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = AtriumConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"window\""));
        assert!(json.contains("\"apps\""));
        assert!(json.contains("\"navigation\""));
        assert!(json.contains("\"login_sync\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/atrium_missing_config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = AtriumConfig::default();
        let json = config_to_json(&config);
        let parsed: AtriumConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.apps.len(), config.apps.len());
        assert_eq!(parsed.window.rail_width, 72);
    }
}
