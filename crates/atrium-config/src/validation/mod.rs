//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError` so the user sees
//! all of them at once.

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use crate::schema::{AtriumConfig, RAIL_SURFACE, SETTINGS_SURFACE};
use atrium_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AtriumConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_window(&mut errors, config);
    validate_apps(&mut errors, config);
    validate_navigation(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_window(errors: &mut Vec<String>, config: &AtriumConfig) {
    validate_range(errors, "window.rail_width", config.window.rail_width, 32, 400);
    if config.window.width == 0 || config.window.height == 0 {
        errors.push("window.width and window.height must be non-zero".into());
    }
}

fn validate_apps(errors: &mut Vec<String>, config: &AtriumConfig) {
    if config.apps.is_empty() {
        errors.push("apps must not be empty".into());
        return;
    }

    let mut seen = HashSet::new();
    for app in &config.apps {
        if app.name.is_empty() {
            errors.push("apps: name must not be empty".into());
        }
        if app.name == RAIL_SURFACE || app.name == SETTINGS_SURFACE {
            errors.push(format!("apps: '{}' is a reserved surface name", app.name));
        }
        if !seen.insert(app.name.as_str()) {
            errors.push(format!("apps: duplicate name '{}'", app.name));
        }
        match url::Url::parse(&app.url) {
            Ok(u) if u.scheme() == "https" || u.scheme() == "http" => {}
            _ => errors.push(format!("apps.{}: url '{}' is not http(s)", app.name, app.url)),
        }
    }
}

fn validate_navigation(errors: &mut Vec<String>, config: &AtriumConfig) {
    validate_range(
        errors,
        "navigation.max_redirect_depth",
        config.navigation.max_redirect_depth,
        1,
        8,
    );
    for r in &config.navigation.redirectors {
        if r.params.is_empty() {
            errors.push(format!("navigation.redirectors: '{}' has no params", r.host));
        }
    }
}
