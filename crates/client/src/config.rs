use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tomohigara_core::locale::Locale;

use crate::preview::{DataUriPreviewer, ObjectUrlPreviewer, ObjectUrlRegistry, PreviewGenerator};

/// A configuration variable was set to something unusable.
#[derive(Debug, thiserror::Error)]
#[error("{var} has an invalid value: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// How screenshot previews are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Inline `data:` URIs.
    #[default]
    Inline,
    /// Revocable `blob:` object URLs.
    ObjectUrl,
}

impl PreviewMode {
    /// Build the matching generator. Object URLs are registered in `registry`.
    pub fn previewer(self, registry: &ObjectUrlRegistry) -> Arc<dyn PreviewGenerator> {
        match self {
            PreviewMode::Inline => Arc::new(DataUriPreviewer),
            PreviewMode::ObjectUrl => Arc::new(ObjectUrlPreviewer::new(registry.clone())),
        }
    }
}

impl FromStr for PreviewMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(PreviewMode::Inline),
            "object-url" => Ok(PreviewMode::ObjectUrl),
            _ => Err(()),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where the multipart POST goes (the site root for the form backend).
    pub form_endpoint: String,
    /// Lower bound on how long the "submitting" state is shown.
    pub min_display: Duration,
    pub preview_mode: PreviewMode,
    pub locale: Locale,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            form_endpoint: "http://localhost:8888/".into(),
            min_display: Duration::from_millis(3000),
            preview_mode: PreviewMode::Inline,
            locale: Locale::Ja,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `FORM_ENDPOINT`        | `http://localhost:8888/` |
    /// | `MIN_DISPLAY_MS`       | `3000`                   |
    /// | `PREVIEW_MODE`         | `inline`                 |
    /// | `REPORT_LANG`          | `ja`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`Self::from_env`] but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let form_endpoint = lookup("FORM_ENDPOINT").unwrap_or(defaults.form_endpoint);

        let min_display = match lookup("MIN_DISPLAY_MS") {
            Some(v) => Duration::from_millis(parse("MIN_DISPLAY_MS", v)?),
            None => defaults.min_display,
        };

        let preview_mode = match lookup("PREVIEW_MODE") {
            Some(v) => parse("PREVIEW_MODE", v)?,
            None => defaults.preview_mode,
        };

        let locale = match lookup("REPORT_LANG") {
            Some(v) => parse("REPORT_LANG", v)?,
            None => defaults.locale,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", v)?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            form_endpoint,
            min_display,
            preview_mode,
            locale,
            request_timeout,
        })
    }
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError { var, value })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
