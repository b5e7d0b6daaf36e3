//! AtriumApp struct definition and constructor.

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;

use winit::window::{Window, WindowId};

use atrium_config::AtriumConfig;
use atrium_host::Host;
use atrium_session::ProfileManager;
use atrium_webview::WryBackend;

use super::aux_windows::AuxWindow;
use super::dialogs::DialogResult;
use super::shell::AppShell;

pub(super) type AppHost = Host<WryBackend<Window>, AppShell>;

/// Top-level application state.
pub struct AtriumApp {
    pub(super) config: AtriumConfig,

    // Consumed by the host when the window first opens
    pub(super) profiles: Option<ProfileManager>,
    pub(super) initial_surface: Option<String>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) host: Option<AppHost>,
    pub(super) aux_windows: HashMap<WindowId, AuxWindow>,
    pub(super) next_aux_id: u64,

    // Native dialogs run on the runtime and answer over this channel
    pub(super) dialog_tx: mpsc::Sender<DialogResult>,
    pub(super) dialog_rx: mpsc::Receiver<DialogResult>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    pub(super) should_exit: bool,
}

impl AtriumApp {
    pub fn new(
        config: AtriumConfig,
        profiles: ProfileManager,
        initial_surface: Option<String>,
    ) -> Self {
        let (dialog_tx, dialog_rx) = mpsc::channel();
        let tokio_runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("atrium-dialogs")
            .enable_all()
            .build()
        {
            Ok(rt) => Some(rt),
            Err(e) => {
                tracing::warn!("Failed to start async runtime, dialogs disabled: {e}");
                None
            }
        };

        Self {
            config,
            profiles: Some(profiles),
            initial_surface,
            window: None,
            host: None,
            aux_windows: HashMap::new(),
            next_aux_id: 1,
            dialog_tx,
            dialog_rx,
            tokio_runtime,
            should_exit: false,
        }
    }
}
