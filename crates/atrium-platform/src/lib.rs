//! OS integration: directories, crash reports, native notifications,
//! handing URLs to the system browser, and native dialogs.

pub mod crash_report;
pub mod dialogs;
pub mod external;
pub mod notifications;
pub mod paths;

pub use dialogs::{ask_link_choice, pick_avatar, LinkChoice};
pub use external::{is_external_scheme_allowed, open_external};
pub use notifications::notify;
pub use paths::{
    cache_dir, config_dir, crash_report_dir, data_dir, ensure_dirs, log_dir, partitions_dir,
    profiles_file,
};
