//! Login detection.
//!
//! Each app surface runs a small state machine fed with the URLs it lands
//! on:
//!
//! ```text
//! Idle --auth page--> OnAuthPage --first-party app page--> LoginDetected
//!                       |    ^
//!                       |    +-- auth / intermediate pages
//!                       +--other page--> Idle
//! ```
//!
//! `LoginDetected` is terminal for the tracker; it fires exactly once.

use serde::{Deserialize, Serialize};
use url::Url;

use atrium_config::schema::IntermediatePattern;
use atrium_config::AtriumConfig;

use crate::host::{host_in, host_matches, host_of};

/// What a landed URL means to the login heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A sign-in page.
    Auth,
    /// Assertion consumers and redirect-staging hops between sign-in and app.
    Intermediate,
    /// A real first-party app page.
    FirstParty,
    /// Anything else (external SSO, unrelated sites, local pages).
    Other,
}

/// Host/path rules used to classify landed pages.
#[derive(Debug, Clone, Default)]
pub struct LoginPages {
    auth_domains: Vec<String>,
    app_domains: Vec<String>,
    intermediate: Vec<IntermediatePattern>,
}

impl LoginPages {
    pub fn new(
        auth_domains: Vec<String>,
        app_domains: Vec<String>,
        intermediate: Vec<IntermediatePattern>,
    ) -> Self {
        Self {
            auth_domains,
            app_domains,
            intermediate,
        }
    }

    pub fn from_config(config: &AtriumConfig) -> Self {
        Self::new(
            config.login_sync.auth_domains.clone(),
            config.app_domains(),
            config.login_sync.intermediate.clone(),
        )
    }

    pub fn kind_of(&self, raw: &str) -> PageKind {
        let Ok(url) = Url::parse(raw) else {
            return PageKind::Other;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return PageKind::Other;
        }
        let Some(host) = host_of(&url) else {
            return PageKind::Other;
        };

        if host_in(&host, &self.auth_domains) {
            PageKind::Auth
        } else if self
            .intermediate
            .iter()
            .any(|p| pattern_matches(p, &host, url.path()))
        {
            PageKind::Intermediate
        } else if host_in(&host, &self.app_domains) {
            PageKind::FirstParty
        } else {
            PageKind::Other
        }
    }
}

fn pattern_matches(pattern: &IntermediatePattern, host: &str, path: &str) -> bool {
    if pattern.host.is_none() && pattern.path_prefix.is_none() && pattern.path_contains.is_none() {
        return false;
    }
    let host_ok = pattern
        .host
        .as_deref()
        .map_or(true, |h| host_matches(host, h));
    let prefix_ok = pattern
        .path_prefix
        .as_deref()
        .map_or(true, |p| path.starts_with(p));
    let contains_ok = pattern
        .path_contains
        .as_deref()
        .map_or(true, |p| path.contains(p));
    host_ok && prefix_ok && contains_ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoginState {
    #[default]
    Idle,
    OnAuthPage,
    LoginDetected,
}

/// Per-surface login state machine.
#[derive(Debug, Clone, Default)]
pub struct LoginTracker {
    state: LoginState,
}

impl LoginTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Feed one landed page. Returns `true` only on the transition into
    /// `LoginDetected`.
    pub fn observe(&mut self, kind: PageKind) -> bool {
        let next = match (self.state, kind) {
            (LoginState::LoginDetected, _) => LoginState::LoginDetected,
            (LoginState::Idle, PageKind::Auth) => LoginState::OnAuthPage,
            (LoginState::Idle, _) => LoginState::Idle,
            (LoginState::OnAuthPage, PageKind::Auth | PageKind::Intermediate) => {
                LoginState::OnAuthPage
            }
            (LoginState::OnAuthPage, PageKind::FirstParty) => LoginState::LoginDetected,
            (LoginState::OnAuthPage, PageKind::Other) => LoginState::Idle,
        };
        let fired = next == LoginState::LoginDetected && self.state != LoginState::LoginDetected;
        self.state = next;
        fired
    }

    pub fn reset(&mut self) {
        self.state = LoginState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> LoginPages {
        LoginPages::from_config(&AtriumConfig::default())
    }

    #[test]
    fn classifies_landed_pages() {
        let p = pages();
        assert_eq!(
            p.kind_of("https://accounts.google.com/v3/signin/identifier"),
            PageKind::Auth
        );
        assert_eq!(p.kind_of("https://mail.google.com/mail/u/0/"), PageKind::FirstParty);
        assert_eq!(
            p.kind_of("https://mail.google.com/accounts/SetOSID?authuser=0"),
            PageKind::Intermediate
        );
        assert_eq!(
            p.kind_of("https://www.google.com/a/example.com/acs"),
            PageKind::Intermediate
        );
        assert_eq!(p.kind_of("https://sso.corp.example/login"), PageKind::Other);
        assert_eq!(p.kind_of("atrium://localhost/rail/index.html"), PageKind::Other);
        assert_eq!(p.kind_of("garbage"), PageKind::Other);
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        let p = LoginPages::new(
            vec![],
            vec!["mail.google.com".into()],
            vec![IntermediatePattern::default()],
        );
        assert_eq!(p.kind_of("https://mail.google.com/"), PageKind::FirstParty);
    }

    #[test]
    fn all_pattern_fields_must_match() {
        let p = LoginPages::new(
            vec![],
            vec!["docs.google.com".into()],
            vec![IntermediatePattern {
                host: Some("docs.google.com".into()),
                path_prefix: Some("/staging".into()),
                path_contains: None,
            }],
        );
        assert_eq!(p.kind_of("https://docs.google.com/staging/x"), PageKind::Intermediate);
        assert_eq!(p.kind_of("https://docs.google.com/document/"), PageKind::FirstParty);
    }

    #[test]
    fn auth_then_app_detects_login_once() {
        let mut t = LoginTracker::new();
        assert!(!t.observe(PageKind::FirstParty));
        assert_eq!(t.state(), LoginState::Idle);
        assert!(!t.observe(PageKind::Auth));
        assert_eq!(t.state(), LoginState::OnAuthPage);
        assert!(!t.observe(PageKind::Intermediate));
        assert_eq!(t.state(), LoginState::OnAuthPage);
        assert!(t.observe(PageKind::FirstParty));
        assert_eq!(t.state(), LoginState::LoginDetected);
        assert!(!t.observe(PageKind::FirstParty));
        assert!(!t.observe(PageKind::Auth));
        assert_eq!(t.state(), LoginState::LoginDetected);
    }

    #[test]
    fn leaving_to_external_page_abandons() {
        let mut t = LoginTracker::new();
        t.observe(PageKind::Auth);
        assert!(!t.observe(PageKind::Other));
        assert_eq!(t.state(), LoginState::Idle);
        assert!(!t.observe(PageKind::FirstParty));
        assert_eq!(t.state(), LoginState::Idle);
    }

    #[test]
    fn intermediate_from_idle_stays_idle() {
        let mut t = LoginTracker::new();
        assert!(!t.observe(PageKind::Intermediate));
        assert_eq!(t.state(), LoginState::Idle);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut t = LoginTracker::new();
        t.observe(PageKind::Auth);
        t.observe(PageKind::FirstParty);
        t.reset();
        assert_eq!(t.state(), LoginState::Idle);
    }

    #[test]
    fn full_url_sequence() {
        let p = pages();
        let mut t = LoginTracker::new();
        let seq = [
            "https://mail.google.com/mail/u/0/",
            "https://accounts.google.com/ServiceLogin?service=mail",
            "https://accounts.google.com/v3/signin/challenge/pwd",
            "https://accounts.youtube.com/accounts/SetSID",
            "https://mail.google.com/accounts/SetOSID?authuser=0",
        ];
        for url in seq {
            assert!(!t.observe(p.kind_of(url)), "{url}");
        }
        assert!(t.observe(p.kind_of("https://mail.google.com/mail/u/0/#inbox")));
    }
}
