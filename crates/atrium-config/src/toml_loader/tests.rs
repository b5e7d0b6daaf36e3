//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_atrium_config.toml"));
    assert!(matches!(
        result.unwrap_err(),
        atrium_common::ConfigError::ParseError(_)
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[window]
rail_width = 96

[login_sync]
settle_delay_ms = 250
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.rail_width, 96);
    assert_eq!(config.login_sync.settle_delay_ms, 250);
    // Defaults preserved
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.login_sync.cooldown_ms, 5000);
    assert_eq!(config.apps.len(), 6);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(
        result.unwrap_err(),
        atrium_common::ConfigError::ParseError(_)
    ));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\nrail_width = 5\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.rail_width, 5);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atrium").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.title, "Atrium");
    assert_eq!(config.navigation.max_redirect_depth, 3);
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_ends_with_atrium() {
    let path = default_config_path().unwrap();
    assert_eq!(path.file_name().unwrap(), "config.toml");
    assert!(path.parent().unwrap().ends_with("atrium"));
}
