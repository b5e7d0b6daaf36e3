//! Native dialogs. All of them are async so the event loop keeps running
//! while the user decides.

use std::path::PathBuf;

use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

const OPEN_HERE: &str = "Open in New Window";
const OPEN_EXTERNAL: &str = "Open in Browser";
const CANCEL: &str = "Cancel";

/// The user's answer to "where should this app link open?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChoice {
    /// Open in an auxiliary Atrium window.
    OpenHere,
    /// Hand the URL to the system browser.
    OpenExternally,
    /// Leave the current surface untouched.
    Cancel,
}

/// Map a raw dialog result to a choice. Platforms differ in whether custom
/// buttons come back as `Custom(label)` or as the positional variants.
pub fn choice_from_result(result: MessageDialogResult) -> LinkChoice {
    match result {
        MessageDialogResult::Custom(label) if label == OPEN_HERE => LinkChoice::OpenHere,
        MessageDialogResult::Custom(label) if label == OPEN_EXTERNAL => LinkChoice::OpenExternally,
        MessageDialogResult::Yes => LinkChoice::OpenHere,
        MessageDialogResult::No => LinkChoice::OpenExternally,
        _ => LinkChoice::Cancel,
    }
}

/// Ask whether an app-domain link should open in a new Atrium window or the
/// system browser.
pub async fn ask_link_choice(url: &str) -> LinkChoice {
    let result = AsyncMessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Open link")
        .set_description(format!("Where would you like to open this link?\n\n{url}"))
        .set_buttons(MessageButtons::YesNoCancelCustom(
            OPEN_HERE.into(),
            OPEN_EXTERNAL.into(),
            CANCEL.into(),
        ))
        .show()
        .await;
    choice_from_result(result)
}

/// Let the user pick a profile picture. `None` on cancel.
pub async fn pick_avatar() -> Option<PathBuf> {
    AsyncFileDialog::new()
        .set_title("Choose profile picture")
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_labels_map_to_choices() {
        assert_eq!(
            choice_from_result(MessageDialogResult::Custom(OPEN_HERE.into())),
            LinkChoice::OpenHere
        );
        assert_eq!(
            choice_from_result(MessageDialogResult::Custom(OPEN_EXTERNAL.into())),
            LinkChoice::OpenExternally
        );
        assert_eq!(
            choice_from_result(MessageDialogResult::Custom(CANCEL.into())),
            LinkChoice::Cancel
        );
    }

    #[test]
    fn positional_results_map_to_choices() {
        assert_eq!(choice_from_result(MessageDialogResult::Yes), LinkChoice::OpenHere);
        assert_eq!(
            choice_from_result(MessageDialogResult::No),
            LinkChoice::OpenExternally
        );
        assert_eq!(choice_from_result(MessageDialogResult::Cancel), LinkChoice::Cancel);
        assert_eq!(choice_from_result(MessageDialogResult::Ok), LinkChoice::Cancel);
    }
}
