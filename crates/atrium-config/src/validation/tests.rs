use super::*;
use crate::schema::AppConfig;

#[test]
fn default_config_is_valid() {
    assert!(validate(&AtriumConfig::default()).is_ok());
}

#[test]
fn rail_width_out_of_range() {
    let mut config = AtriumConfig::default();
    config.window.rail_width = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.rail_width = 10"), "got: {err}");
}

#[test]
fn empty_apps_rejected() {
    let mut config = AtriumConfig::default();
    config.apps.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("apps must not be empty"));
}

#[test]
fn duplicate_and_reserved_names_rejected() {
    let mut config = AtriumConfig::default();
    config.apps.push(AppConfig::new("gmail", "Again", "https://mail.google.com/"));
    config.apps.push(AppConfig::new("rail", "Rail", "https://example.com/"));
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("duplicate name 'gmail'"), "got: {err}");
    assert!(err.contains("'rail' is a reserved surface name"), "got: {err}");
}

#[test]
fn non_http_app_url_rejected() {
    let mut config = AtriumConfig::default();
    config.apps[0].url = "file:///etc/passwd".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("is not http(s)"), "got: {err}");
}

#[test]
fn redirect_depth_bounds() {
    let mut config = AtriumConfig::default();
    config.navigation.max_redirect_depth = 0;
    assert!(validate(&config).is_err());
    config.navigation.max_redirect_depth = 9;
    assert!(validate(&config).is_err());
    config.navigation.max_redirect_depth = 8;
    assert!(validate(&config).is_ok());
}

#[test]
fn errors_are_collected_together() {
    let mut config = AtriumConfig::default();
    config.window.width = 0;
    config.navigation.max_redirect_depth = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
    assert!(err.contains("max_redirect_depth"));
}
