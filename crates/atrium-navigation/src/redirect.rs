//! Redirector unwrapping.
//!
//! Links inside remote apps are often wrapped as
//! `https://www.google.com/url?q=<real target>`. The wrapped target decides
//! the classification, and wrappers may nest. Unwrapping stops after a fixed
//! number of layers.

use url::Url;

use atrium_config::schema::RedirectorConfig;

use crate::host::{host_of, host_matches};

#[derive(Debug, Clone, PartialEq)]
pub struct Redirector {
    pub host: String,
    pub path: String,
    pub params: Vec<String>,
}

impl From<&RedirectorConfig> for Redirector {
    fn from(c: &RedirectorConfig) -> Self {
        Self {
            host: c.host.clone(),
            path: c.path.clone(),
            params: c.params.clone(),
        }
    }
}

impl Redirector {
    /// The wrapped target if `url` is this redirector carrying a parseable
    /// absolute URL in one of its parameters.
    pub fn inner_target(&self, url: &Url) -> Option<Url> {
        let host = host_of(url)?;
        if !host_matches(&host, &self.host) || url.path() != self.path {
            return None;
        }
        self.params.iter().find_map(|param| {
            url.query_pairs()
                .find(|(k, _)| k == param.as_str())
                .and_then(|(_, v)| Url::parse(&v).ok())
        })
    }
}

/// Result of unwrapping a URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwrapped {
    /// The innermost target (the input itself when it is not wrapped).
    Resolved { target: Url, layers: u32 },
    /// Still wrapped after `max_depth` layers.
    TooDeep,
}

/// Peel redirector layers off `url`, at most `max_depth` of them.
pub fn unwrap(url: &Url, redirectors: &[Redirector], max_depth: u32) -> Unwrapped {
    let mut current = url.clone();
    let mut layers = 0;
    loop {
        let inner = redirectors.iter().find_map(|r| r.inner_target(&current));
        match inner {
            None => return Unwrapped::Resolved {
                target: current,
                layers,
            },
            Some(_) if layers >= max_depth => return Unwrapped::TooDeep,
            Some(next) => {
                current = next;
                layers += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google() -> Vec<Redirector> {
        vec![Redirector {
            host: "www.google.com".into(),
            path: "/url".into(),
            params: vec!["q".into(), "url".into()],
        }]
    }

    fn wrap(target: &str) -> String {
        let mut u = Url::parse("https://www.google.com/url").unwrap();
        u.query_pairs_mut().append_pair("q", target).append_pair("sa", "D");
        u.to_string()
    }

    #[test]
    fn plain_url_is_resolved_unchanged() {
        let url = Url::parse("https://example.com/a").unwrap();
        assert_eq!(
            unwrap(&url, &google(), 3),
            Unwrapped::Resolved {
                target: url.clone(),
                layers: 0
            }
        );
    }

    #[test]
    fn single_layer_is_unwrapped() {
        let url = Url::parse(&wrap("https://mail.google.com/mail/u/0/#inbox")).unwrap();
        match unwrap(&url, &google(), 3) {
            Unwrapped::Resolved { target, layers } => {
                assert_eq!(target.host_str(), Some("mail.google.com"));
                assert_eq!(layers, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fallback_param_is_used() {
        let url = Url::parse("https://www.google.com/url?url=https%3A%2F%2Fdocs.google.com%2F")
            .unwrap();
        match unwrap(&url, &google(), 3) {
            Unwrapped::Resolved { target, .. } => {
                assert_eq!(target.host_str(), Some("docs.google.com"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nesting_beyond_bound_is_too_deep() {
        let mut s = "https://mail.google.com/".to_string();
        for _ in 0..4 {
            s = wrap(&s);
        }
        let url = Url::parse(&s).unwrap();
        assert_eq!(unwrap(&url, &google(), 3), Unwrapped::TooDeep);
        assert!(matches!(
            unwrap(&url, &google(), 4),
            Unwrapped::Resolved { layers: 4, .. }
        ));
    }

    #[test]
    fn self_referential_wrapper_terminates() {
        // q points back at a redirector that points back at itself.
        let inner = "https://www.google.com/url?q=https://www.google.com/url";
        let url = Url::parse(&wrap(inner)).unwrap();
        let result = unwrap(&url, &google(), 3);
        assert!(matches!(result, Unwrapped::Resolved { .. } | Unwrapped::TooDeep));
    }

    #[test]
    fn wrong_path_is_not_a_redirector() {
        let url = Url::parse("https://www.google.com/search?q=https://evil.com").unwrap();
        assert!(matches!(
            unwrap(&url, &google(), 3),
            Unwrapped::Resolved { layers: 0, .. }
        ));
    }

    #[test]
    fn non_url_param_is_not_unwrapped() {
        let url = Url::parse("https://www.google.com/url?q=just+words").unwrap();
        assert!(matches!(
            unwrap(&url, &google(), 3),
            Unwrapped::Resolved { layers: 0, .. }
        ));
    }
}
