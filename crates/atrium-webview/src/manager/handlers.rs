use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use atrium_navigation::{NavigationDecision, NavigationPolicy};

use crate::content::{request_path, ContentProvider};
use crate::events::{PageLoadState, SurfaceEvent};

// =============================================================================
// NAVIGATION SCREENING
// =============================================================================

/// Run `url` through the policy for a surface whose app lives at `home`
/// and which is currently showing `current`. Returns `None` when the load
/// may proceed in place, otherwise the event describing the refusal.
pub fn screen_navigation(
    policy: &NavigationPolicy,
    surface: &str,
    home: Option<&str>,
    current: Option<&str>,
    url: &str,
) -> Option<SurfaceEvent> {
    let (decision, classified) = policy.decide_from(home, current, url);
    match decision {
        NavigationDecision::AllowInPlace => None,
        _ => Some(SurfaceEvent::NavigationDenied {
            surface: surface.to_string(),
            url: url.to_string(),
            decision,
            target: classified.target,
        }),
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) type EventSink = Arc<Mutex<Vec<SurfaceEvent>>>;

fn push(events: &EventSink, event: SurfaceEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

pub(super) fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    policy: Arc<NavigationPolicy>,
    surface: String,
    home_url: String,
    current_url: Arc<Mutex<String>>,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        let current = current_url.lock().map(|u| u.clone()).ok();
        let home = Some(home_url.as_str());
        match screen_navigation(&policy, &surface, home, current.as_deref(), &url) {
            None => {
                debug!(surface = %surface, url = %url, "navigation allowed");
                true
            }
            Some(denied) => {
                debug!(surface = %surface, url = %url, "navigation intercepted");
                push(&events, denied);
                false
            }
        }
    })
}

/// Secondary-window requests never create a window; the host decides.
pub(super) fn attach_new_window_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    surface: String,
) -> WebViewBuilder<'a> {
    builder.with_new_window_req_handler(move |url| {
        debug!(surface = %surface, url = %url, "new window requested");
        push(
            &events,
            SurfaceEvent::NewWindowRequested {
                surface: surface.clone(),
                url,
            },
        );
        false
    })
}

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    surface: String,
    current_url: Arc<Mutex<String>>,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(surface = %surface, ?state, url = %url, "page load");
        if let Ok(mut current) = current_url.lock() {
            current.clone_from(&url);
        }
        push(
            &events,
            SurfaceEvent::PageLoad {
                surface: surface.clone(),
                state,
                url,
            },
        );
    })
}

pub(super) fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    surface: String,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(
                surface = %surface,
                body_len = body.len(),
                "IPC message rejected: invalid JSON"
            );
            return;
        }

        debug!(surface = %surface, body_len = body.len(), "IPC message from JS");
        push(
            &events,
            SurfaceEvent::IpcMessage {
                surface: surface.clone(),
                body,
            },
        );
    })
}

pub(super) fn attach_custom_protocol<'a>(
    builder: WebViewBuilder<'a>,
    provider: Arc<ContentProvider>,
) -> WebViewBuilder<'a> {
    builder.with_custom_protocol("atrium".to_string(), move |_wv_id, request| {
        let uri = request.uri().to_string();
        let path = request_path(&uri);

        let response = match provider.resolve(path) {
            Some((mime, data)) => wry::http::Response::builder()
                .status(200)
                .header("Content-Type", mime.as_ref())
                .header("Access-Control-Allow-Origin", "atrium://localhost")
                .body(std::borrow::Cow::from(data.into_owned())),
            None => {
                warn!(path = %path, "custom protocol: asset not found");
                wry::http::Response::builder()
                    .status(404)
                    .body(std::borrow::Cow::from(b"Not Found".to_vec()))
            }
        };
        response.unwrap_or_else(|e| {
            warn!(error = %e, "custom protocol: failed to build response");
            wry::http::Response::new(std::borrow::Cow::from(Vec::new()))
        })
    })
}

// =============================================================================
// TESTS
// =============================================================================
