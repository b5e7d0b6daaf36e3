use super::*;
use crate::testing::{Call, RecordingBackend};

fn apps() -> Vec<SurfaceSpec> {
    vec![
        SurfaceSpec::app("gmail", "https://mail.google.com/"),
        SurfaceSpec::app("calendar", "https://calendar.google.com/"),
    ]
}

fn registry() -> SurfaceRegistry<RecordingBackend> {
    SurfaceRegistry::new(RecordingBackend::new(), "rail", "settings")
}

fn populated() -> SurfaceRegistry<RecordingBackend> {
    let mut reg = registry();
    reg.create_rail(Rect::new(0.0, 0.0, 72.0, 800.0)).unwrap();
    reg.create_all(&apps(), Some("persist:profile-abc"), Rect::new(72.0, 0.0, 1208.0, 800.0))
        .unwrap();
    reg
}

#[test]
fn create_all_adds_settings_and_binds_partition() {
    let reg = populated();
    assert_eq!(reg.names(), vec!["gmail", "calendar", "settings"]);
    assert_eq!(reg.partition(), Some("persist:profile-abc"));
    for name in ["gmail", "calendar", "settings"] {
        assert_eq!(
            reg.backend().partition_of(name),
            Some(Some("persist:profile-abc".to_string()))
        );
        assert!(!reg.backend().is_visible(name), "{name} starts hidden");
    }
    assert_eq!(reg.backend().partition_of("rail"), Some(None));
}

#[test]
fn create_all_without_window_fails() {
    let mut reg = SurfaceRegistry::new(RecordingBackend::without_window(), "rail", "settings");
    let err = reg.create_all(&apps(), None, Rect::sized(10.0, 10.0)).unwrap_err();
    assert!(matches!(err, SurfaceError::NoWindow(_)));
    assert!(reg.names().is_empty());
}

#[test]
fn create_all_skips_failing_surface() {
    let mut backend = RecordingBackend::new();
    backend.fail_create("calendar");
    let mut reg = SurfaceRegistry::new(backend, "rail", "settings");
    let created = reg.create_all(&apps(), None, Rect::sized(10.0, 10.0)).unwrap();
    assert_eq!(created, 2);
    assert_eq!(reg.names(), vec!["gmail", "settings"]);
}

#[test]
fn show_only_stacks_rail_last() {
    let mut reg = populated();
    assert!(reg.show_only("calendar"));
    assert_eq!(reg.display_order(), ["calendar".to_string(), "rail".to_string()]);
    assert_eq!(reg.active(), Some("calendar"));

    let b = reg.backend();
    assert!(b.is_visible("calendar"));
    assert!(!b.is_visible("gmail"));
    assert!(!b.is_visible("settings"));
    assert!(b.is_visible("rail"));
}

#[test]
fn show_only_exactly_one_content_surface_visible() {
    let mut reg = populated();
    reg.show_only("gmail");
    reg.show_only("settings");
    let visible: Vec<_> = reg
        .names()
        .into_iter()
        .filter(|n| reg.backend().is_visible(n))
        .collect();
    assert_eq!(visible, vec!["settings"]);
}

#[test]
fn show_only_unknown_is_noop() {
    let mut reg = populated();
    reg.show_only("gmail");
    reg.backend().clear_calls();
    assert!(!reg.show_only("nope"));
    assert_eq!(reg.active(), Some("gmail"));
    assert_eq!(reg.display_order(), ["gmail".to_string(), "rail".to_string()]);
    assert!(reg.backend().calls().is_empty());
}

#[test]
fn destroy_all_is_best_effort() {
    let mut backend = RecordingBackend::new();
    backend.fail_destroy("gmail");
    let mut reg = SurfaceRegistry::new(backend, "rail", "settings");
    reg.create_rail(Rect::sized(72.0, 100.0)).unwrap();
    reg.create_all(&apps(), None, Rect::sized(10.0, 10.0)).unwrap();
    reg.show_only("gmail");

    reg.destroy_all();

    assert!(reg.names().is_empty());
    assert_eq!(reg.active(), None);
    assert_eq!(reg.display_order(), ["rail".to_string()]);
    assert_eq!(reg.backend().live_names(), vec!["rail".to_string()]);
    let destroys: Vec<_> = reg
        .backend()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Destroy(_)))
        .collect();
    assert_eq!(destroys.len(), 3);
}

#[test]
fn destroy_all_twice_is_harmless() {
    let mut reg = populated();
    reg.destroy_all();
    reg.destroy_all();
    assert!(reg.names().is_empty());
}

#[test]
fn destroy_rail_removes_it_from_display() {
    let mut reg = populated();
    reg.show_only("gmail");
    reg.destroy_rail();
    assert!(!reg.is_alive("rail"));
    assert_eq!(reg.display_order(), ["gmail".to_string()]);
}

#[test]
fn apply_layout_sizes_every_content_surface() {
    let mut reg = populated();
    reg.backend().clear_calls();
    let layout = SurfaceLayout {
        rail: Rect::new(0.0, 0.0, 72.0, 600.0),
        active: "gmail".into(),
        content: Rect::new(72.0, 0.0, 728.0, 600.0),
    };
    reg.apply_layout(&layout);
    let calls = reg.backend().calls();
    assert!(calls.contains(&Call::SetBounds("rail".into(), layout.rail)));
    for name in ["gmail", "calendar", "settings"] {
        assert!(calls.contains(&Call::SetBounds(name.into(), layout.content)));
    }
}

#[test]
fn send_to_dead_surface_is_error() {
    let mut reg = populated();
    reg.destroy_all();
    let err = reg.send("gmail", "x", &serde_json::Value::Null).unwrap_err();
    assert!(matches!(err, SurfaceError::Unknown(_)));
    assert!(reg.send("rail", "x", &serde_json::Value::Null).is_ok());
}

#[test]
fn app_named_like_settings_is_not_duplicated() {
    let mut reg = registry();
    let specs = vec![SurfaceSpec::app("settings", "https://example.com/")];
    reg.create_all(&specs, None, Rect::sized(1.0, 1.0)).unwrap();
    assert_eq!(reg.names(), vec!["settings"]);
    assert!(reg.backend().spec_of("settings").unwrap().is_settings_surface());
}
