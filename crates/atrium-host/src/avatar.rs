//! Profile picture extraction after a login.
//!
//! Purely cosmetic: the probe's result is applied only when the surface it
//! ran on is still alive, and any failure is dropped. It never affects the
//! login-sync restart.

/// Capability that extracts a profile image from a signed-in page.
pub trait AvatarProbe {
    /// Script to evaluate on the surface, or `None` to skip probing.
    fn script(&self) -> Option<&str>;

    /// Turn the JSON-encoded script result into an avatar reference.
    fn parse(&self, result: &str) -> Option<String>;
}

/// Never probes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAvatarProbe;

impl AvatarProbe for NoopAvatarProbe {
    fn script(&self) -> Option<&str> {
        None
    }

    fn parse(&self, _result: &str) -> Option<String> {
        None
    }
}

/// Reads the account button image Google apps render in their header.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptAvatarProbe;

const ACCOUNT_IMAGE_SCRIPT: &str = r#"
(function() {
    var img = document.querySelector('a[aria-label*="Google Account"] img')
        || document.querySelector('img[src*="googleusercontent.com"]');
    return img ? img.src : null;
})()
"#;

impl AvatarProbe for ScriptAvatarProbe {
    fn script(&self) -> Option<&str> {
        Some(ACCOUNT_IMAGE_SCRIPT)
    }

    fn parse(&self, result: &str) -> Option<String> {
        let src: Option<String> = serde_json::from_str(result).ok()?;
        src.filter(|s| s.starts_with("https://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_probe_never_runs() {
        assert!(NoopAvatarProbe.script().is_none());
        assert!(NoopAvatarProbe.parse("\"https://x\"").is_none());
    }

    #[test]
    fn script_probe_accepts_https_images_only() {
        let p = ScriptAvatarProbe;
        assert!(p.script().is_some());
        assert_eq!(
            p.parse(r#""https://lh3.googleusercontent.com/a/abc=s64""#).as_deref(),
            Some("https://lh3.googleusercontent.com/a/abc=s64")
        );
        assert_eq!(p.parse("null"), None);
        assert_eq!(p.parse(r#""javascript:alert(1)""#), None);
        assert_eq!(p.parse("not json"), None);
    }
}
