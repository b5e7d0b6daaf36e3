//! Local content serving via the `atrium://` custom protocol.
//!
//! Bundled pages (rail, settings) are served without a local HTTP server.
//! In-memory overrides take precedence over files under the base directory.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Serves local files from a base directory via custom protocol.
///
/// `atrium://localhost/rail/index.html` resolves to
/// `{base_dir}/rail/index.html` (or the matching override).
pub struct ContentProvider {
    base_dir: PathBuf,
    overrides: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Register an in-memory asset override.
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    /// Resolve a request path to content bytes and MIME type.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.split(|c| c == '?' || c == '#').next().unwrap_or("");
        let clean = clean.trim_start_matches('/');

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the base.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Owned(mime.to_string()), Cow::Owned(data)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Strip the scheme and host from a custom-protocol request URI.
pub fn request_path(uri: &str) -> &str {
    uri.strip_prefix("atrium://localhost/")
        .or_else(|| uri.strip_prefix("atrium://localhost"))
        .or_else(|| uri.strip_prefix("http://atrium.localhost/"))
        .or_else(|| uri.strip_prefix("atrium:///"))
        .or_else(|| uri.strip_prefix("atrium://"))
        .unwrap_or("")
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_rail() -> (tempfile::TempDir, ContentProvider) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("rail")).unwrap();
        std::fs::write(dir.path().join("rail/index.html"), "<html>rail</html>").unwrap();
        std::fs::write(dir.path().join("rail/rail.css"), "body{}").unwrap();
        let cp = ContentProvider::new(dir.path());
        (dir, cp)
    }

    #[test]
    fn resolves_file_with_mime() {
        let (_dir, cp) = provider_with_rail();
        let (mime, data) = cp.resolve("rail/index.html").unwrap();
        assert_eq!(mime.as_ref(), "text/html");
        assert_eq!(data.as_ref(), b"<html>rail</html>");
        assert_eq!(cp.resolve("/rail/rail.css").unwrap().0.as_ref(), "text/css");
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        let (_dir, cp) = provider_with_rail();
        assert!(cp.resolve("rail/index.html?v=2#top").is_some());
    }

    #[test]
    fn traversal_is_blocked() {
        let (_dir, cp) = provider_with_rail();
        assert!(cp.resolve("../../etc/passwd").is_none());
        assert!(cp.resolve("rail/../../../etc/passwd").is_none());
        assert!(cp.resolve("/etc/passwd").is_none());
    }

    #[test]
    fn missing_file_is_none() {
        let (_dir, cp) = provider_with_rail();
        assert!(cp.resolve("settings/index.html").is_none());
    }

    #[test]
    fn override_takes_precedence() {
        let (_dir, mut cp) = provider_with_rail();
        cp.add_override("rail/index.html", "text/html", b"<html>built-in</html>".to_vec());
        cp.add_override("settings/index.html", "text/html", b"<html>s</html>".to_vec());
        assert_eq!(cp.resolve("rail/index.html").unwrap().1.as_ref(), b"<html>built-in</html>");
        assert!(cp.resolve("settings/index.html").is_some());
    }

    #[test]
    fn request_path_strips_origin_variants() {
        assert_eq!(request_path("atrium://localhost/rail/index.html"), "rail/index.html");
        assert_eq!(request_path("http://atrium.localhost/settings/index.html"), "settings/index.html");
        assert_eq!(request_path("atrium:///rail/a.js"), "rail/a.js");
        assert_eq!(request_path("https://example.com/x"), "");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(mime_from_extension(Path::new("blob.xyz")), "application/octet-stream");
    }
}
