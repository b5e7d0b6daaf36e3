//! Hand a URL to the system's default handler.

use atrium_common::PlatformError;
use tracing::info;

/// Schemes that may leave the app. Anything else (`file:`, `javascript:`,
/// custom app schemes) is refused.
const EXTERNAL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

pub fn is_external_scheme_allowed(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(u) => EXTERNAL_SCHEMES.contains(&u.scheme()),
        Err(_) => false,
    }
}

/// Open `url` in the default browser / handler.
pub fn open_external(url: &str) -> Result<(), PlatformError> {
    if !is_external_scheme_allowed(url) {
        return Err(PlatformError::NotSupported(format!(
            "refusing to open '{url}' externally"
        )));
    }
    webbrowser::open(url).map_err(|e| PlatformError::ExternalOpenError(e.to_string()))?;
    info!(url, "handed off to external handler");
    Ok(())
}
