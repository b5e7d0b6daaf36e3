//! URL classification and the allow / prompt / external decision.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use atrium_config::AtriumConfig;

use crate::host::{host_in, host_of};
use crate::redirect::{self, Redirector, Unwrapped};

/// Custom scheme serving the bundled rail and settings pages.
pub const LOCAL_SCHEME: &str = "atrium";

/// WebView2 rewrites `atrium://localhost/...` to this origin on Windows.
const LOCAL_REWRITTEN_ORIGIN: &str = "http://atrium.localhost";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Bundled local content (`atrium://`, `about:blank`).
    Local,
    /// Authentication / SSO host on the allow-list.
    InternalSameDomain,
    /// A first-party remote app host.
    AppDomain,
    /// Anything else.
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationDecision {
    AllowInPlace,
    DenyAndPrompt,
    DenyAndExternal,
}

/// A classification plus the URL it applies to: the innermost redirector
/// target, or the input when it was not wrapped or could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub kind: Classification,
    pub target: String,
    /// Lowercased host of `target`, if any.
    pub host: Option<String>,
}

/// Static allow-lists. Classification is a pure function of these and the URL.
#[derive(Debug, Clone, Default)]
pub struct NavigationPolicy {
    auth_domains: Vec<String>,
    app_domains: Vec<String>,
    redirectors: Vec<Redirector>,
    max_redirect_depth: u32,
}

impl NavigationPolicy {
    pub fn new(
        auth_domains: Vec<String>,
        app_domains: Vec<String>,
        redirectors: Vec<Redirector>,
        max_redirect_depth: u32,
    ) -> Self {
        Self {
            auth_domains,
            app_domains,
            redirectors,
            max_redirect_depth,
        }
    }

    pub fn from_config(config: &AtriumConfig) -> Self {
        Self::new(
            config.navigation.auth_domains.clone(),
            config.app_domains(),
            config
                .navigation
                .redirectors
                .iter()
                .map(Redirector::from)
                .collect(),
            config.navigation.max_redirect_depth,
        )
    }

    pub fn is_app_host(&self, host: &str) -> bool {
        host_in(host, &self.app_domains)
    }

    pub fn is_auth_host(&self, host: &str) -> bool {
        host_in(host, &self.auth_domains)
    }

    /// Classify `raw`, resolving redirector wrappers first.
    pub fn classify(&self, raw: &str) -> Classified {
        if is_local(raw) {
            return Classified {
                kind: Classification::Local,
                target: raw.to_string(),
                host: None,
            };
        }

        let Ok(url) = Url::parse(raw) else {
            return Classified {
                kind: Classification::External,
                target: raw.to_string(),
                host: None,
            };
        };

        let target = match redirect::unwrap(&url, &self.redirectors, self.max_redirect_depth) {
            Unwrapped::Resolved { target, .. } => target,
            Unwrapped::TooDeep => {
                debug!(url = %raw, "redirect nesting exceeds bound, treating as external");
                return Classified {
                    kind: Classification::External,
                    target: raw.to_string(),
                    host: host_of(&url),
                };
            }
        };

        if is_local(target.as_str()) {
            return Classified {
                kind: Classification::Local,
                target: target.to_string(),
                host: None,
            };
        }

        let host = host_of(&target);
        let web = matches!(target.scheme(), "http" | "https");
        let kind = match host.as_deref() {
            Some(h) if web && self.is_auth_host(h) => Classification::InternalSameDomain,
            Some(h) if web && self.is_app_host(h) => Classification::AppDomain,
            _ => Classification::External,
        };

        Classified {
            kind,
            target: target.to_string(),
            host,
        }
    }

    /// Decide what to do when a surface currently showing `current_url`
    /// asks to load `raw`.
    pub fn decide(&self, current_url: Option<&str>, raw: &str) -> (NavigationDecision, Classified) {
        self.decide_from(None, current_url, raw)
    }

    /// Like [`decide`](Self::decide) for a surface whose own app lives at
    /// `home_url`. An app-domain target on the home host stays in place even
    /// while the surface is showing another page, such as a sign-in form.
    pub fn decide_from(
        &self,
        home_url: Option<&str>,
        current_url: Option<&str>,
        raw: &str,
    ) -> (NavigationDecision, Classified) {
        let classified = self.classify(raw);
        let decision = match classified.kind {
            Classification::Local | Classification::InternalSameDomain => {
                NavigationDecision::AllowInPlace
            }
            Classification::AppDomain => {
                let same_host = |u: Option<&str>| {
                    u.and_then(|u| Url::parse(u).ok())
                        .and_then(|u| host_of(&u))
                        .is_some_and(|h| classified.host.as_deref() == Some(h.as_str()))
                };
                if same_host(current_url) || same_host(home_url) {
                    NavigationDecision::AllowInPlace
                } else {
                    NavigationDecision::DenyAndPrompt
                }
            }
            Classification::External => NavigationDecision::DenyAndExternal,
        };
        (decision, classified)
    }
}

fn is_local(raw: &str) -> bool {
    if raw == "about:blank" || raw.starts_with(&format!("{LOCAL_SCHEME}://")) {
        return true;
    }
    match raw.strip_prefix(LOCAL_REWRITTEN_ORIGIN) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NavigationPolicy {
        NavigationPolicy::from_config(&AtriumConfig::default())
    }

    fn wrapped(target: &str) -> String {
        let mut u = Url::parse("https://www.google.com/url").unwrap();
        u.query_pairs_mut().append_pair("q", target);
        u.to_string()
    }

    #[test]
    fn auth_hosts_are_internal() {
        let c = policy().classify("https://accounts.google.com/signin/v2/identifier");
        assert_eq!(c.kind, Classification::InternalSameDomain);
    }

    #[test]
    fn app_hosts_are_app_domain() {
        for url in [
            "https://mail.google.com/mail/u/0/#inbox",
            "https://calendar.google.com/calendar/r",
            "https://sheets.google.com/",
        ] {
            assert_eq!(policy().classify(url).kind, Classification::AppDomain, "{url}");
        }
    }

    #[test]
    fn unrelated_hosts_are_external() {
        for url in [
            "https://example.com/",
            "https://mail.google.com.evil.test/",
            "mailto:someone@example.com",
            "not a url",
        ] {
            assert_eq!(policy().classify(url).kind, Classification::External, "{url}");
        }
    }

    #[test]
    fn local_content_is_allowed() {
        let p = policy();
        for url in [
            "atrium://localhost/rail/index.html",
            "http://atrium.localhost/settings/index.html",
            "about:blank",
        ] {
            assert_eq!(p.classify(url).kind, Classification::Local, "{url}");
            assert_eq!(p.decide(None, url).0, NavigationDecision::AllowInPlace);
        }
        assert_ne!(
            p.classify("http://atrium.localhost.evil.test/").kind,
            Classification::Local
        );
    }

    #[test]
    fn wrapped_url_classifies_like_inner() {
        let p = policy();
        for inner in [
            "https://mail.google.com/mail/u/0/#inbox/abc",
            "https://accounts.google.com/ServiceLogin",
            "https://example.com/article",
        ] {
            let direct = p.classify(inner);
            let via = p.classify(&wrapped(inner));
            assert_eq!(direct.kind, via.kind, "{inner}");
            assert_eq!(direct.target, via.target, "{inner}");
        }
    }

    #[test]
    fn excessive_wrapping_is_external() {
        let mut s = "https://mail.google.com/".to_string();
        for _ in 0..5 {
            s = wrapped(&s);
        }
        assert_eq!(policy().classify(&s).kind, Classification::External);
    }

    #[test]
    fn classify_is_pure() {
        let p = policy();
        let url = wrapped("https://drive.google.com/file/d/1");
        assert_eq!(p.classify(&url), p.classify(&url));
    }

    #[test]
    fn external_is_handed_off() {
        let (decision, c) = policy().decide(
            Some("https://mail.google.com/mail/u/0/"),
            "https://news.example.org/story",
        );
        assert_eq!(decision, NavigationDecision::DenyAndExternal);
        assert_eq!(c.target, "https://news.example.org/story");
    }

    #[test]
    fn other_app_prompts() {
        let (decision, _) = policy().decide(
            Some("https://mail.google.com/mail/u/0/"),
            "https://docs.google.com/document/d/1/edit",
        );
        assert_eq!(decision, NavigationDecision::DenyAndPrompt);
    }

    #[test]
    fn same_app_host_is_intra_app() {
        let (decision, _) = policy().decide(
            Some("https://mail.google.com/mail/u/0/#inbox"),
            "https://mail.google.com/mail/u/0/#settings",
        );
        assert_eq!(decision, NavigationDecision::AllowInPlace);

        let (decision, _) = policy().decide(
            Some("https://mail.google.com/mail/u/0/"),
            &wrapped("https://mail.google.com/mail/u/1/"),
        );
        assert_eq!(decision, NavigationDecision::AllowInPlace);
    }

    #[test]
    fn app_link_without_current_url_prompts() {
        let (decision, _) = policy().decide(None, "https://drive.google.com/");
        assert_eq!(decision, NavigationDecision::DenyAndPrompt);
    }

    #[test]
    fn auth_is_allowed_in_place_from_any_surface() {
        let (decision, _) = policy().decide(
            Some("https://drive.google.com/"),
            "https://accounts.google.com/o/oauth2/auth",
        );
        assert_eq!(decision, NavigationDecision::AllowInPlace);
    }

    #[test]
    fn sign_in_returns_to_home_app_in_place() {
        let p = policy();
        let signin = "https://accounts.google.com/v3/signin/challenge/pwd";
        let back = "https://mail.google.com/accounts/SetOSID?authuser=0";

        let (decision, _) = p.decide(Some(signin), back);
        assert_eq!(decision, NavigationDecision::DenyAndPrompt);

        let home = Some("https://mail.google.com/mail/u/0/");
        let (decision, _) = p.decide_from(home, Some(signin), back);
        assert_eq!(decision, NavigationDecision::AllowInPlace);
    }

    #[test]
    fn home_host_does_not_admit_other_apps() {
        let (decision, _) = policy().decide_from(
            Some("https://mail.google.com/mail/u/0/"),
            Some("https://accounts.google.com/ServiceLogin"),
            "https://docs.google.com/document/d/1/edit",
        );
        assert_eq!(decision, NavigationDecision::DenyAndPrompt);
    }
}
