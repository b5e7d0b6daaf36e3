//! Event pumping, timer firing and wake-up scheduling.

use std::time::{Duration, Instant};

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::AtriumApp;
use super::shell::ShellRequest;

/// Upper bound between wake-ups, so webview events never wait long.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

impl AtriumApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if let Some(host) = self.host.as_mut() {
            host.pump_events(now);
        }
        self.poll_dialogs();

        let restart_due = self
            .host
            .as_mut()
            .is_some_and(|host| host.poll_timers(now));
        if restart_due {
            self.restart_surfaces(event_loop, now);
        }

        self.run_shell_requests(event_loop);

        let mut wake = Instant::now() + POLL_INTERVAL;
        if let Some(deadline) = self.host.as_ref().and_then(|h| h.next_deadline()) {
            wake = wake.min(deadline);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }

    /// Carry out everything the host queued on its shell.
    pub(super) fn run_shell_requests(&mut self, event_loop: &ActiveEventLoop) {
        let requests = match self.host.as_mut() {
            Some(host) => host.shell_mut().take_requests(),
            None => return,
        };

        for request in requests {
            match request {
                ShellRequest::OpenExternal(url) => {
                    if !atrium_platform::is_external_scheme_allowed(&url) {
                        tracing::warn!("Refusing to open external URL: {url}");
                        continue;
                    }
                    if let Err(e) = atrium_platform::open_external(&url) {
                        tracing::warn!("Failed to open {url} externally: {e}");
                    }
                }
                ShellRequest::PromptLink { id, url } => self.spawn_link_prompt(id, url),
                ShellRequest::OpenAuxiliary { url, partition } => {
                    self.open_auxiliary_window(event_loop, &url, partition.as_deref());
                }
                ShellRequest::PickAvatar(profile_id) => self.spawn_avatar_picker(profile_id),
                ShellRequest::Notify { title, body } => {
                    if let Err(e) = atrium_platform::notify(&title, &body) {
                        tracing::debug!("Notification not shown: {e}");
                    }
                }
                ShellRequest::SetTitle(title) => {
                    if let Some(window) = &self.window {
                        window.set_title(&title);
                    }
                }
            }
        }
    }
}
