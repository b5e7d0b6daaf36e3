//! Session Partition Manager: CRUD over profiles with synchronous
//! persistence after every mutation.


use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use atrium_common::{new_id, ProfileError};

use crate::partition;
use crate::profile::{Profile, ProfileUpdate, DEFAULT_PROFILE_ID};
use crate::store::ProfileDocument;

/// Owns the profile document and (optionally) the file backing it.
#[derive(Debug)]
pub struct ProfileManager {
    doc: ProfileDocument,
    /// `None` for an in-memory store that never touches disk.
    path: Option<PathBuf>,
}

impl ProfileManager {
    /// Open the store at `path`, initializing it when missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let path = path.into();
        let doc = match ProfileDocument::load(&path)? {
            Some(doc) if !doc.profiles.is_empty() => doc,
            Some(_) => {
                warn!(path = %path.display(), "profile store has no profiles, reinitializing");
                ProfileDocument::fresh()
            }
            None => {
                info!(path = %path.display(), "initializing profile store");
                ProfileDocument::fresh()
            }
        };
        let manager = Self {
            doc,
            path: Some(path),
        };
        manager.persist()?;
        Ok(manager)
    }

    /// A fresh store that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            doc: ProfileDocument::fresh(),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All profiles in insertion order.
    pub fn list_profiles(&self) -> &[Profile] {
        &self.doc.profiles
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.doc.profiles.iter().find(|p| p.id == id)
    }

    pub fn active_id(&self) -> &str {
        &self.doc.active_profile_id
    }

    /// The active profile. Fails with `Integrity` when the stored active id
    /// does not resolve.
    pub fn get_active(&self) -> Result<&Profile, ProfileError> {
        self.get(&self.doc.active_profile_id).ok_or_else(|| {
            ProfileError::Integrity(format!(
                "active profile id '{}' does not resolve",
                self.doc.active_profile_id
            ))
        })
    }

    /// Point the active id back at a real profile after an `Integrity`
    /// failure. Returns the id now active.
    pub fn repair_active(&mut self) -> Result<String, ProfileError> {
        if self.get_active().is_ok() {
            return Ok(self.doc.active_profile_id.clone());
        }
        let fallback = fallback_active_id(&self.doc);
        warn!(
            stale = %self.doc.active_profile_id,
            fallback = %fallback,
            "repairing active profile id"
        );
        let mut next = self.doc.clone();
        next.active_profile_id = fallback.clone();
        self.commit(next)?;
        Ok(fallback)
    }

    /// Create a profile with a generated id and persist it.
    pub fn create(&mut self, name: &str, avatar_path: Option<String>) -> Result<Profile, ProfileError> {
        let name = name.trim();
        let profile = Profile {
            id: new_id(),
            name: if name.is_empty() {
                format!("Profile {}", self.doc.profiles.len() + 1)
            } else {
                name.to_string()
            },
            avatar_path,
            created_at: Utc::now(),
            is_default: false,
            disabled_apps: Vec::new(),
        };
        let mut next = self.doc.clone();
        next.profiles.push(profile.clone());
        self.commit(next)?;
        info!(profile_id = %profile.id, name = %profile.name, "profile created");
        Ok(profile)
    }

    /// Merge `update` into the profile. `id` and `is_default` are immutable.
    pub fn update(&mut self, id: &str, update: ProfileUpdate) -> Result<Profile, ProfileError> {
        let mut next = self.doc.clone();
        let profile = next
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;
        update.apply(profile);
        let updated = profile.clone();
        self.commit(next)?;
        info!(profile_id = %id, "profile updated");
        Ok(updated)
    }

    /// Delete a non-default profile. Deleting the active profile moves the
    /// active pointer to the default profile (or the first remaining one).
    pub fn delete(&mut self, id: &str) -> Result<(), ProfileError> {
        if id == DEFAULT_PROFILE_ID || self.get(id).is_some_and(|p| p.is_default) {
            return Err(ProfileError::Protected(id.to_string()));
        }
        let index = self
            .doc
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;

        let mut next = self.doc.clone();
        next.profiles.remove(index);
        if next.active_profile_id == id {
            next.active_profile_id = fallback_active_id(&next);
            info!(active = %next.active_profile_id, "active profile reassigned");
        }
        self.commit(next)?;
        info!(profile_id = %id, "profile deleted");
        Ok(())
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), ProfileError> {
        if self.get(id).is_none() {
            return Err(ProfileError::NotFound(id.to_string()));
        }
        let mut next = self.doc.clone();
        next.active_profile_id = id.to_string();
        self.commit(next)?;
        info!(profile_id = %id, "active profile set");
        Ok(())
    }

    /// Storage namespace for `id`; `None` for the default profile.
    pub fn partition_for(&self, id: &str) -> Option<String> {
        partition::partition_for(id)
    }

    /// Save `next` and only then adopt it; a failed save leaves memory
    /// matching disk.
    fn commit(&mut self, next: ProfileDocument) -> Result<(), ProfileError> {
        if let Some(path) = &self.path {
            next.save(path)?;
        }
        self.doc = next;
        Ok(())
    }

    fn persist(&self) -> Result<(), ProfileError> {
        match &self.path {
            Some(path) => self.doc.save(path),
            None => Ok(()),
        }
    }
}

fn fallback_active_id(doc: &ProfileDocument) -> String {
    doc.profiles
        .iter()
        .find(|p| p.id == DEFAULT_PROFILE_ID)
        .or_else(|| doc.profiles.first())
        .map(|p| p.id.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE_ID.to_string())
}
