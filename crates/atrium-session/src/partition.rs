//! Profile -> storage namespace mapping.

use std::path::{Path, PathBuf};

use crate::profile::DEFAULT_PROFILE_ID;

const PARTITION_PREFIX: &str = "persist:profile-";

/// Storage namespace for a profile id. `None` means the unpartitioned
/// default session; every other id gets a stable, id-derived namespace.
pub fn partition_for(profile_id: &str) -> Option<String> {
    if profile_id == DEFAULT_PROFILE_ID {
        None
    } else {
        Some(format!("{PARTITION_PREFIX}{profile_id}"))
    }
}

/// On-disk data directory backing a partition, rooted at `root`.
///
/// ASCII letters, digits and `-` are kept; every other byte becomes `_`
/// followed by two hex digits, so distinct partitions never share a
/// directory and none can leave `root`.
pub fn partition_dir(root: &Path, partition: Option<&str>) -> PathBuf {
    match partition {
        None => root.join("default"),
        Some(p) => {
            let name = p.strip_prefix("persist:").unwrap_or(p);
            let mut safe = String::with_capacity(name.len());
            for b in name.bytes() {
                if b.is_ascii_alphanumeric() || b == b'-' {
                    safe.push(char::from(b));
                } else {
                    safe.push_str(&format!("_{b:02x}"));
                }
            }
            root.join(safe)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_unpartitioned() {
        assert_eq!(partition_for(DEFAULT_PROFILE_ID), None);
    }

    #[test]
    fn partition_is_stable_and_distinct() {
        let a1 = partition_for("a1b2").unwrap();
        let a2 = partition_for("a1b2").unwrap();
        let b = partition_for("c3d4").unwrap();
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(a1, "persist:profile-a1b2");
    }

    #[test]
    fn partition_dir_layout() {
        let root = Path::new("/data/partitions");
        assert_eq!(partition_dir(root, None), root.join("default"));
        assert_eq!(
            partition_dir(root, Some("persist:profile-1234")),
            root.join("profile-1234")
        );
    }

    #[test]
    fn partition_dir_cannot_escape_root() {
        let root = Path::new("/data/partitions");
        let dir = partition_dir(root, Some("persist:../../etc"));
        assert!(dir.starts_with(root));
        assert_eq!(dir.components().count(), root.components().count() + 1);
    }

    #[test]
    fn partition_dirs_do_not_collide() {
        let root = Path::new("/data/partitions");
        let dotted = partition_dir(root, Some("persist:profile-a.b"));
        let underscored = partition_dir(root, Some("persist:profile-a_b"));
        assert_ne!(dotted, underscored);
        assert_eq!(dotted, root.join("profile-a_2eb"));
        assert_eq!(underscored, root.join("profile-a_5fb"));
    }

    #[test]
    fn generated_ids_map_verbatim() {
        let root = Path::new("/data/partitions");
        let id = "3f2b8c1e-9d4a-4e7b-a1c2-0f9e8d7c6b5a";
        let partition = partition_for(id).unwrap();
        assert_eq!(
            partition_dir(root, Some(&partition)),
            root.join(format!("profile-{id}"))
        );
    }
}
