use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use std::path::PathBuf;

use crate::paths::crash_report_dir;

use super::sanitize::sanitize_secrets;

/// Writes a crash report to disk when a panic occurs.
///
/// Returns the path to the written report, or `None` if writing failed.
/// Runs inside a panic hook, so every error is swallowed.
///
/// Session material is redacted before writing. On Unix, the report file is
/// set to mode 0o600.
pub fn write_crash_report(info: &PanicHookInfo) -> Option<PathBuf> {
    let now = chrono::Utc::now();
    let dir = crash_report_dir().ok()?;
    let path = dir.join(format!("atrium-crash-{}.json", now.format("%Y%m%d-%H%M%S")));

    let location = info.location().map(|loc| {
        serde_json::json!({
            "file": loc.file(),
            "line": loc.line(),
            "column": loc.column(),
        })
    });
    let thread = std::thread::current().name().unwrap_or("<unnamed>").to_string();
    let backtrace = Backtrace::force_capture().to_string();

    let report = serde_json::json!({
        "timestamp": now.to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "thread": thread,
        "panic_message": sanitize_secrets(&payload_text(info)),
        "location": location,
        "backtrace": sanitize_secrets(&backtrace),
    });

    std::fs::create_dir_all(&dir).ok()?;
    std::fs::write(&path, serde_json::to_string_pretty(&report).ok()?).ok()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
    }

    Some(path)
}

fn payload_text(info: &PanicHookInfo) -> String {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
