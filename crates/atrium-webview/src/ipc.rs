//! IPC protocol between Rust and page JavaScript.
//!
//! - **JS -> Rust**: `window.atrium.ipc.send(kind, payload)` posts a JSON
//!   envelope `{kind, payload}` to the webview's `ipc_handler`.
//! - **Rust -> JS**: `js_dispatch_message` builds a script that invokes the
//!   handler the page registered with `window.atrium.ipc.on(kind, fn)`.

use serde::{Deserialize, Serialize};

/// A typed IPC message from JavaScript to Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / command name.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    #[serde(default)]
    pub payload: IpcPayload,
}

/// Payload of an IPC message: a bare string or structured JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    #[default]
    None,
}

impl IpcPayload {
    /// The payload as a JSON value (`null` when absent).
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Json(v) => v.clone(),
            Self::None => serde_json::Value::Null,
        }
    }

    /// The payload as a string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn json(kind: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Json(value),
        }
    }
}

/// Injected as an initialization script into every local surface.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.atrium = window.atrium || {};
    window.atrium.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
})();
"#;

/// Injected into remote app surfaces after [`IPC_INIT_SCRIPT`]: reports the
/// unread count parsed from the document title and forwards page
/// notifications to the host.
pub const CONTENT_INIT_SCRIPT: &str = r#"
(function() {
    var lastCount = -1;
    function reportUnread() {
        var m = /\((\d+)\)/.exec(document.title || '');
        var count = m ? parseInt(m[1], 10) : 0;
        if (count !== lastCount) {
            lastCount = count;
            window.atrium.ipc.send('unread_count', count);
        }
    }
    function watchTitle() {
        var el = document.querySelector('title');
        if (!el) {
            return false;
        }
        new MutationObserver(reportUnread).observe(el, { childList: true, characterData: true, subtree: true });
        reportUnread();
        return true;
    }
    document.addEventListener('DOMContentLoaded', function() {
        if (!watchTitle()) {
            setTimeout(watchTitle, 1000);
        }
    });

    function AtriumNotification(title, options) {
        window.atrium.ipc.send('show_notification', {
            title: String(title),
            body: options && options.body ? String(options.body) : ''
        });
    }
    AtriumNotification.permission = 'granted';
    AtriumNotification.requestPermission = function(cb) {
        if (cb) { cb('granted'); }
        return Promise.resolve('granted');
    };
    AtriumNotification.prototype.close = function() {};
    window.Notification = AtriumNotification;
})();
"#;

/// Generate a JS snippet that dispatches a message to the JS IPC handler.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.atrium && window.atrium.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
