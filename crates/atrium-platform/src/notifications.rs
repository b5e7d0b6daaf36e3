use atrium_common::PlatformError;
use tracing::debug;

/// Longest title or body passed to the OS, in characters. Web pages control
/// both strings.
const MAX_TEXT_CHARS: usize = 240;

/// Sends a native notification to the user.
///
/// - macOS: `osascript`.
/// - Linux and BSDs: `notify-send` from libnotify.
/// - Other platforms: logged only.
pub fn notify(title: &str, body: &str) -> Result<(), PlatformError> {
    let title = clip(title);
    let body = clip(body);
    platform_notify(&title, &body)
}

/// Truncate to [`MAX_TEXT_CHARS`] on a character boundary, ellipsis appended.
fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT_CHARS {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_TEXT_CHARS - 1).collect();
    clipped.push('…');
    clipped
}

/// Escape a string for embedding in an AppleScript string literal.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg_attr(not(unix), allow(dead_code))]
fn run(program: &str, args: &[&str]) -> Result<(), PlatformError> {
    let output = std::process::Command::new(program)
        .args(args)
        .output()
        .map_err(|e| PlatformError::NotificationError(format!("failed to run {program}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlatformError::NotificationError(format!(
            "{program} failed: {stderr}"
        )));
    }
    debug!(program, "native notification sent");
    Ok(())
}

#[cfg(target_os = "macos")]
fn platform_notify(title: &str, body: &str) -> Result<(), PlatformError> {
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        applescript_escape(body),
        applescript_escape(title)
    );
    run("osascript", &["-e", &script])
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_notify(title: &str, body: &str) -> Result<(), PlatformError> {
    // `--` keeps page-controlled text from being read as options.
    run("notify-send", &["--app-name=Atrium", "--", title, body])
}

#[cfg(not(unix))]
fn platform_notify(title: &str, _body: &str) -> Result<(), PlatformError> {
    tracing::info!(title, "notification (no native backend on this platform)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_quotes_and_backslashes() {
        assert_eq!(applescript_escape(r#"a "b" \c"#), r#"a \"b\" \\c"#);
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(clip("3 unread"), "3 unread");
        assert_eq!(clip(""), "");
    }

    #[test]
    fn long_text_is_clipped_on_char_boundary() {
        let long = "é".repeat(MAX_TEXT_CHARS + 10);
        let clipped = clip(&long);
        assert_eq!(clipped.chars().count(), MAX_TEXT_CHARS);
        assert!(clipped.ends_with('…'));
    }

    #[test]
    fn missing_program_is_a_notification_error() {
        let err = run("atrium-no-such-notifier", &[]).unwrap_err();
        assert!(matches!(err, PlatformError::NotificationError(_)));
    }
}
