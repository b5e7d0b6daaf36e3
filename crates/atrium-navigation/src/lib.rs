//! Navigation security policy.
//!
//! Every URL a surface wants to load, every secondary-window request and
//! every page that finishes loading passes through here:
//! - [`NavigationPolicy`] decides allow-in-place / prompt / external hand-off
//! - [`redirect`] unwraps redirector URLs with a hard depth bound
//! - [`login`] classifies pages for login detection and tracks the
//!   per-surface login state machine

pub mod host;
pub mod login;
pub mod policy;
pub mod redirect;

pub use login::{LoginPages, LoginState, LoginTracker, PageKind};
pub use policy::{Classification, Classified, NavigationDecision, NavigationPolicy};
pub use redirect::{Redirector, Unwrapped};
