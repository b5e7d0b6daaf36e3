//! The persisted profile document.
//!
//! ```json
//! { "profiles": [{ "id": "default", "name": "Default", "avatarPath": null,
//!                  "createdAt": "...", "isDefault": true }],
//!   "activeProfileId": "default" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use atrium_common::ProfileError;

use crate::profile::{Profile, DEFAULT_PROFILE_ID};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub profiles: Vec<Profile>,
    pub active_profile_id: String,
}

impl ProfileDocument {
    /// A freshly initialized store: exactly the default profile, active.
    pub fn fresh() -> Self {
        Self {
            profiles: vec![Profile::default_profile()],
            active_profile_id: DEFAULT_PROFILE_ID.to_string(),
        }
    }

    /// Read the document at `path`. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ProfileError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ProfileError::Persist(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        let doc = serde_json::from_str(&content).map_err(|e| {
            ProfileError::Persist(format!("failed to parse {}: {e}", path.display()))
        })?;
        Ok(Some(doc))
    }

    /// Write the document to `path` (via a sibling temp file and rename).
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProfileError::Persist(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ProfileError::Persist(format!("failed to serialize profiles: {e}")))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .and_then(|_| std::fs::rename(&tmp, path))
            .map_err(|e| ProfileError::Persist(format!("failed to write {}: {e}", path.display())))?;

        debug!(path = %path.display(), profiles = self.profiles.len(), "profile store saved");
        Ok(())
    }
}
