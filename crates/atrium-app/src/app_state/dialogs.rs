//! Native dialogs spawned on the runtime; answers come back over a channel
//! and are applied on the event-loop thread.

use std::future::Future;
use std::path::PathBuf;

use atrium_platform::LinkChoice;

use super::core::AtriumApp;

/// Answer from a finished dialog.
#[derive(Debug)]
pub(crate) enum DialogResult {
    LinkChoice { prompt_id: u64, choice: LinkChoice },
    Avatar { profile_id: String, path: Option<PathBuf> },
}

impl AtriumApp {
    pub(super) fn spawn_link_prompt(&self, prompt_id: u64, url: String) {
        self.spawn_dialog(
            async move {
                let choice = atrium_platform::ask_link_choice(&url).await;
                DialogResult::LinkChoice { prompt_id, choice }
            },
            DialogResult::LinkChoice {
                prompt_id,
                choice: LinkChoice::Cancel,
            },
        );
    }

    pub(super) fn spawn_avatar_picker(&self, profile_id: String) {
        let fallback = DialogResult::Avatar {
            profile_id: profile_id.clone(),
            path: None,
        };
        self.spawn_dialog(
            async move {
                let path = atrium_platform::pick_avatar().await;
                DialogResult::Avatar { profile_id, path }
            },
            fallback,
        );
    }

    /// Run `dialog` on the runtime and post its answer. Without a runtime
    /// the `cancelled` answer is posted at once so no prompt is left dangling.
    fn spawn_dialog<F>(&self, dialog: F, cancelled: DialogResult)
    where
        F: Future<Output = DialogResult> + Send + 'static,
    {
        let tx = self.dialog_tx.clone();
        let Some(rt) = &self.tokio_runtime else {
            tracing::warn!("No async runtime, dialog treated as cancelled");
            let _ = tx.send(cancelled);
            return;
        };
        rt.spawn(async move {
            let _ = tx.send(dialog.await);
        });
    }

    /// Apply every dialog answer that has arrived since the last poll.
    pub(super) fn poll_dialogs(&mut self) {
        while let Ok(result) = self.dialog_rx.try_recv() {
            let Some(host) = self.host.as_mut() else {
                continue;
            };
            match result {
                DialogResult::LinkChoice { prompt_id, choice } => {
                    host.resolve_link_choice(prompt_id, choice);
                }
                DialogResult::Avatar { profile_id, path } => {
                    let path = path.map(|p| p.to_string_lossy().into_owned());
                    host.avatar_picked(&profile_id, path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_config::AtriumConfig;
    use atrium_session::ProfileManager;

    fn app() -> AtriumApp {
        AtriumApp::new(AtriumConfig::default(), ProfileManager::in_memory(), None)
    }

    #[test]
    fn results_without_host_are_discarded() {
        let mut app = app();
        app.dialog_tx
            .send(DialogResult::LinkChoice {
                prompt_id: 1,
                choice: LinkChoice::OpenHere,
            })
            .unwrap();
        app.poll_dialogs();
        assert!(app.dialog_rx.try_recv().is_err());
    }

    #[test]
    fn missing_runtime_answers_cancel() {
        let mut app = app();
        if let Some(rt) = app.tokio_runtime.take() {
            rt.shutdown_background();
        }
        app.spawn_link_prompt(3, "https://docs.google.com/x".into());
        match app.dialog_rx.try_recv() {
            Ok(DialogResult::LinkChoice { prompt_id, choice }) => {
                assert_eq!(prompt_id, 3);
                assert_eq!(choice, LinkChoice::Cancel);
            }
            other => panic!("unexpected: {other:?}"),
        }

        app.spawn_avatar_picker("p1".into());
        match app.dialog_rx.try_recv() {
            Ok(DialogResult::Avatar { profile_id, path }) => {
                assert_eq!(profile_id, "p1");
                assert!(path.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn runtime_answers_arrive_on_the_channel() {
        let app = app();
        app.spawn_dialog(
            async {
                DialogResult::LinkChoice {
                    prompt_id: 9,
                    choice: LinkChoice::OpenExternally,
                }
            },
            DialogResult::LinkChoice {
                prompt_id: 9,
                choice: LinkChoice::Cancel,
            },
        );
        let result = app
            .dialog_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        match result {
            DialogResult::LinkChoice { prompt_id, choice } => {
                assert_eq!(prompt_id, 9);
                assert_eq!(choice, LinkChoice::OpenExternally);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
