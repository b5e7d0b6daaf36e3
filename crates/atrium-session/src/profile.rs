use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved id of the profile that always exists.
pub const DEFAULT_PROFILE_ID: &str = "default";

/// A named, isolated user identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Filesystem path or remote URL of the profile picture.
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_default: bool,
    /// App surfaces hidden for this profile.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_apps: Vec<String>,
}

impl Profile {
    pub fn default_profile() -> Self {
        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: "Default".to_string(),
            avatar_path: None,
            created_at: Utc::now(),
            is_default: true,
            disabled_apps: Vec::new(),
        }
    }

    pub fn is_app_enabled(&self, app: &str) -> bool {
        !self.disabled_apps.iter().any(|a| a == app)
    }
}

/// Partial update applied by `ProfileManager::update`. `id` and
/// `is_default` are deliberately absent: they never change.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the avatar.
    #[serde(deserialize_with = "double_option")]
    pub avatar_path: Option<Option<String>>,
    pub disabled_apps: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn avatar(path: Option<String>) -> Self {
        Self {
            avatar_path: Some(path),
            ..Default::default()
        }
    }

    pub(crate) fn apply(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                profile.name = trimmed.to_string();
            }
        }
        if let Some(avatar) = self.avatar_path {
            profile.avatar_path = avatar;
        }
        if let Some(disabled) = self.disabled_apps {
            profile.disabled_apps = disabled;
        }
    }
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_camel_case() {
        let p = Profile::default_profile();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], "default");
        assert_eq!(json["isDefault"], true);
        assert!(json["avatarPath"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("disabledApps").is_none());
    }

    #[test]
    fn update_ignores_blank_name() {
        let mut p = Profile::default_profile();
        ProfileUpdate::name("   ").apply(&mut p);
        assert_eq!(p.name, "Default");
        ProfileUpdate::name(" Home ").apply(&mut p);
        assert_eq!(p.name, "Home");
    }

    #[test]
    fn update_from_json_distinguishes_null_avatar() {
        let clear: ProfileUpdate = serde_json::from_str(r#"{"avatarPath":null}"#).unwrap();
        assert_eq!(clear.avatar_path, Some(None));

        let untouched: ProfileUpdate = serde_json::from_str(r#"{"name":"Work"}"#).unwrap();
        assert_eq!(untouched.avatar_path, None);
        assert_eq!(untouched.name.as_deref(), Some("Work"));
    }

    #[test]
    fn update_json_cannot_touch_id_or_default_flag() {
        let upd: ProfileUpdate =
            serde_json::from_str(r#"{"id":"evil","isDefault":true,"name":"X"}"#).unwrap();
        let mut p = Profile::default_profile();
        p.id = "p1".into();
        p.is_default = false;
        upd.apply(&mut p);
        assert_eq!(p.id, "p1");
        assert!(!p.is_default);
        assert_eq!(p.name, "X");
    }

    #[test]
    fn disabled_apps_gate_enablement() {
        let mut p = Profile::default_profile();
        assert!(p.is_app_enabled("gmail"));
        p.disabled_apps.push("gmail".into());
        assert!(!p.is_app_enabled("gmail"));
        assert!(p.is_app_enabled("drive"));
    }
}
