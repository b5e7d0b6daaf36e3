//! The host's side effects, queued and carried out by the event loop.

use atrium_host::{LinkPrompt, Shell};

/// One effect requested by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellRequest {
    OpenExternal(String),
    PromptLink { id: u64, url: String },
    OpenAuxiliary { url: String, partition: Option<String> },
    PickAvatar(String),
    Notify { title: String, body: String },
    SetTitle(String),
}

/// [`Shell`] for the desktop binary. Requests need the event loop (new
/// windows) or the runtime (dialogs), so they are queued here and drained
/// by [`AtriumApp::run_shell_requests`](super::AtriumApp).
#[derive(Debug, Default)]
pub(crate) struct AppShell {
    requests: Vec<ShellRequest>,
}

impl AppShell {
    pub(crate) fn take_requests(&mut self) -> Vec<ShellRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl Shell for AppShell {
    fn open_external(&mut self, url: &str) {
        self.requests.push(ShellRequest::OpenExternal(url.to_string()));
    }

    fn prompt_link_choice(&mut self, prompt: &LinkPrompt) {
        self.requests.push(ShellRequest::PromptLink {
            id: prompt.id,
            url: prompt.url.clone(),
        });
    }

    fn open_auxiliary(&mut self, url: &str, partition: Option<&str>) {
        self.requests.push(ShellRequest::OpenAuxiliary {
            url: url.to_string(),
            partition: partition.map(str::to_string),
        });
    }

    fn pick_avatar(&mut self, profile_id: &str) {
        self.requests
            .push(ShellRequest::PickAvatar(profile_id.to_string()));
    }

    fn notify(&mut self, title: &str, body: &str) {
        self.requests.push(ShellRequest::Notify {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn set_title(&mut self, title: &str) {
        self.requests.push(ShellRequest::SetTitle(title.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_drained_in_order() {
        let mut shell = AppShell::default();
        shell.set_title("Atrium (2)");
        shell.open_auxiliary("https://docs.google.com/x", Some("persist:abc"));
        shell.prompt_link_choice(&LinkPrompt {
            id: 7,
            surface: "gmail".into(),
            url: "https://drive.google.com/file".into(),
        });

        let requests = shell.take_requests();
        assert_eq!(
            requests,
            vec![
                ShellRequest::SetTitle("Atrium (2)".into()),
                ShellRequest::OpenAuxiliary {
                    url: "https://docs.google.com/x".into(),
                    partition: Some("persist:abc".into()),
                },
                ShellRequest::PromptLink {
                    id: 7,
                    url: "https://drive.google.com/file".into(),
                },
            ]
        );
        assert!(shell.take_requests().is_empty());
    }
}
