//! Locale detection, Accept-Language negotiation and language-switch links.
//!
//! Every page lives under a `/{lang}` prefix. Requests without one are
//! redirected to the best supported locale for the client, with Japanese as
//! the default.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    /// Supported locales in preference order for ties.
    pub const SUPPORTED: [Locale; 2] = [Locale::Ja, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }

    /// Look up a supported locale by its two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| CoreError::UnknownValue {
            entity: "locale",
            value: s.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Accept-Language negotiation
// ---------------------------------------------------------------------------

/// Pick the best supported locale for an `Accept-Language` header value.
///
/// Ranges are ordered by quality (stable for equal weights); `q=0` ranges
/// are ignored. A range matches on its primary subtag, so `en-GB` selects
/// `en`. Falls back to the default locale.
pub fn negotiate(accept_language: Option<&str>) -> Locale {
    let Some(header) = accept_language else {
        return Locale::default();
    };

    let mut ranges: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let quality = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((tag, quality))
        })
        .filter(|(_, q)| *q > 0.0)
        .collect();

    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranges
        .into_iter()
        .find_map(|(tag, _)| {
            let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
            Locale::from_code(&primary)
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

static STATIC_ASSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(gif|png|jpg|jpeg|svg|ico|css|js)$").expect("static asset pattern is valid")
});

/// What the locale layer does with an incoming request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the request as is.
    Pass,
    /// Redirect to the locale-prefixed location.
    Redirect(String),
}

/// Locale prefix of a path, if it has one (`/ja`, `/ja/...`).
pub fn path_locale(path: &str) -> Option<Locale> {
    Locale::SUPPORTED.into_iter().find(|l| {
        let prefix = format!("/{}", l.code());
        path == prefix || path.starts_with(&format!("{prefix}/"))
    })
}

/// Decide whether a request needs a locale redirect.
///
/// `query` is appended unchanged to the redirect target.
pub fn route(path: &str, query: Option<&str>, accept_language: Option<&str>) -> RouteDecision {
    if path_locale(path).is_some() {
        return RouteDecision::Pass;
    }

    if path.starts_with("/api") || path.starts_with("/_next") || STATIC_ASSET.is_match(path) {
        return RouteDecision::Pass;
    }

    let locale = negotiate(accept_language);
    let mut target = if path == "/" || path.is_empty() {
        format!("/{locale}/")
    } else {
        format!("/{locale}{path}")
    };
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(q);
    }
    RouteDecision::Redirect(target)
}

// ---------------------------------------------------------------------------
// Language switcher
// ---------------------------------------------------------------------------

/// Links for the language switcher shown in the site header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLinks {
    pub current: Locale,
    /// Path with the locale prefix stripped (`/` for the top page).
    pub base_path: String,
    pub ja_path: String,
    pub en_path: String,
}

impl LanguageLinks {
    pub fn for_path(path: &str) -> Self {
        let (current, rest) = if let Some(rest) = path.strip_prefix("/en") {
            (Locale::En, rest)
        } else if let Some(rest) = path.strip_prefix("/ja") {
            (Locale::Ja, rest)
        } else {
            (Locale::Ja, path)
        };

        let base_path = if rest.is_empty() { "/" } else { rest }.to_string();
        let link = |locale: Locale| {
            if base_path == "/" {
                format!("/{locale}")
            } else {
                format!("/{locale}{base_path}")
            }
        };

        Self {
            current,
            ja_path: link(Locale::Ja),
            en_path: link(Locale::En),
            base_path,
        }
    }

    pub fn path_for(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ja => &self.ja_path,
            Locale::En => &self.en_path,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiate_defaults_to_japanese() {
        assert_eq!(negotiate(None), Locale::Ja);
        assert_eq!(negotiate(Some("")), Locale::Ja);
        assert_eq!(negotiate(Some("fr-FR, de;q=0.8")), Locale::Ja);
    }

    #[test]
    fn negotiate_matches_primary_subtag() {
        assert_eq!(negotiate(Some("en-US,en;q=0.9")), Locale::En);
        assert_eq!(negotiate(Some("ja-JP")), Locale::Ja);
    }

    #[test]
    fn negotiate_respects_quality_order() {
        assert_eq!(negotiate(Some("ja;q=0.5, en;q=0.9")), Locale::En);
        assert_eq!(negotiate(Some("fr, en;q=0.3, ja;q=0.7")), Locale::Ja);
    }

    #[test]
    fn negotiate_skips_rejected_ranges() {
        assert_eq!(negotiate(Some("en;q=0, ja;q=0.1")), Locale::Ja);
        assert_eq!(negotiate(Some("ja;q=0, en")), Locale::En);
    }

    #[test]
    fn prefixed_paths_pass() {
        for path in ["/ja", "/ja/", "/en/bug-report", "/en"] {
            assert_eq!(route(path, None, None), RouteDecision::Pass, "{path}");
        }
    }

    #[test]
    fn lookalike_prefix_is_not_a_locale() {
        assert_eq!(
            route("/english", None, None),
            RouteDecision::Redirect("/ja/english".into())
        );
    }

    #[test]
    fn api_internal_and_static_paths_pass() {
        for path in ["/api/v1/x", "/_next/data", "/favicon.ico", "/img/shot.PNG.png"] {
            assert_eq!(route(path, None, None), RouteDecision::Pass, "{path}");
        }
    }

    #[test]
    fn root_redirects_with_trailing_slash() {
        assert_eq!(
            route("/", None, Some("en-GB")),
            RouteDecision::Redirect("/en/".into())
        );
    }

    #[test]
    fn page_redirect_keeps_path_and_query() {
        assert_eq!(
            route("/bug-report", Some("ref=game"), None),
            RouteDecision::Redirect("/ja/bug-report?ref=game".into())
        );
    }

    #[test]
    fn language_links_for_top_page() {
        let links = LanguageLinks::for_path("/en");
        assert_eq!(links.current, Locale::En);
        assert_eq!(links.base_path, "/");
        assert_eq!(links.ja_path, "/ja");
        assert_eq!(links.en_path, "/en");
    }

    #[test]
    fn language_links_keep_sub_path() {
        let links = LanguageLinks::for_path("/ja/bug-report");
        assert_eq!(links.current, Locale::Ja);
        assert_eq!(links.path_for(Locale::En), "/en/bug-report");
        assert_eq!(links.path_for(Locale::Ja), "/ja/bug-report");
    }

    #[test]
    fn language_links_for_unprefixed_path_default_to_japanese() {
        let links = LanguageLinks::for_path("/bug-report");
        assert_eq!(links.current, Locale::Ja);
        assert_eq!(links.en_path, "/en/bug-report");
    }

    #[test]
    fn unknown_route_segment_is_rejected() {
        assert_eq!(Locale::from_code("fr"), None);
        assert!("fr".parse::<Locale>().is_err());
    }
}
