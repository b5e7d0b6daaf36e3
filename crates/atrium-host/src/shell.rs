//! Side effects the host asks the surrounding application to perform.

pub use atrium_platform::LinkChoice;

use crate::host::LinkPrompt;

/// OS and UI effects outside the surface registry. Implemented by the
/// binary over winit/rfd/webbrowser and by a recorder in tests.
///
/// `prompt_link_choice` and `pick_avatar` only *start* an asynchronous
/// interaction; the answer is fed back through
/// [`Host::resolve_link_choice`](crate::Host::resolve_link_choice) and
/// [`Host::avatar_picked`](crate::Host::avatar_picked).
pub trait Shell {
    /// Hand `url` to the system's default handler.
    fn open_external(&mut self, url: &str);

    /// Ask the user where an app-domain link should open.
    fn prompt_link_choice(&mut self, prompt: &LinkPrompt);

    /// Open `url` in a separate top-level window bound to `partition`.
    fn open_auxiliary(&mut self, url: &str, partition: Option<&str>);

    /// Let the user choose a profile picture for `profile_id`.
    fn pick_avatar(&mut self, profile_id: &str);

    /// Show a native notification. Best effort.
    fn notify(&mut self, title: &str, body: &str);

    fn set_title(&mut self, title: &str);
}
