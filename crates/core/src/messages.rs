//! Localized message dictionaries.
//!
//! A dictionary is a flat JSON object of key -> text. Both locales ship
//! embedded copies; a dictionary loaded at runtime is layered on top of the
//! embedded one for its locale, so a missing key falls back to the built-in
//! text, and an unknown key falls back to the key itself. Lookups never fail.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::error::CoreError;
use crate::locale::Locale;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Dictionary keys the bug-report form reads.
pub mod keys {
    pub const PAGE_TITLE: &str = "page_title";
    pub const PAGE_DESCRIPTION: &str = "page_description";

    pub const ERROR_FILE_LIMIT: &str = "error_file_limit";
    pub const ERROR_FILE_SIZE: &str = "error_file_size";
    pub const ERROR_FILE_SIZE_PARTIAL: &str = "error_file_size_partial";
    pub const ERROR_FILE_PREVIEW: &str = "error_file_preview";
    pub const ERROR_RECAPTCHA: &str = "error_recaptcha";
    pub const ERROR_FREQUENCY_REQUIRED: &str = "error_frequency_required";
    pub const ERROR_SEVERITY_REQUIRED: &str = "error_severity_required";
    pub const ERROR_STEPS_REQUIRED: &str = "error_steps_required";
    pub const ERROR_SERVER: &str = "error_server";
    pub const ERROR_NETWORK: &str = "error_network";
    pub const ERROR_TIMEOUT: &str = "error_timeout";

    pub const SUBMIT_SUCCESS_TITLE: &str = "submit_success_title";
    pub const SUBMIT_SUCCESS_MESSAGE: &str = "submit_success_message";
    pub const SUBMIT_ANOTHER_BUTTON: &str = "submit_another_button";
    pub const SUBMITTING_BUTTON: &str = "submitting_button";
    pub const SUBMIT_BUTTON: &str = "submit_button";

    pub const SCREENSHOT_DELETE_ARIA: &str = "screenshot_delete_aria";

    /// Every key the form templates and the pipeline use.
    pub const REQUIRED: &[&str] = &[
        PAGE_TITLE,
        PAGE_DESCRIPTION,
        ERROR_FILE_LIMIT,
        ERROR_FILE_SIZE,
        ERROR_FILE_SIZE_PARTIAL,
        ERROR_FILE_PREVIEW,
        ERROR_RECAPTCHA,
        ERROR_FREQUENCY_REQUIRED,
        ERROR_SEVERITY_REQUIRED,
        ERROR_STEPS_REQUIRED,
        ERROR_SERVER,
        ERROR_NETWORK,
        ERROR_TIMEOUT,
        SUBMIT_SUCCESS_TITLE,
        SUBMIT_SUCCESS_MESSAGE,
        SUBMIT_ANOTHER_BUTTON,
        "frequency_label",
        "frequency_placeholder",
        "frequency_always",
        "frequency_sometimes",
        "frequency_once",
        "severity_label",
        "severity_placeholder",
        "severity_crash",
        "severity_blocking",
        "severity_minor",
        "severity_suggestion",
        "steps_label",
        "steps_placeholder",
        "expected_label",
        "expected_placeholder",
        "screenshot_label",
        "screenshot_desc_1",
        "screenshot_desc_2",
        "screenshot_desc_3",
        "screenshot_button",
        "screenshot_paste_placeholder",
        SCREENSHOT_DELETE_ARIA,
        "message_label",
        "version_label",
        "version_placeholder",
        "version_desc",
        "os_label",
        "os_placeholder",
        "specs_label",
        "specs_desc_1",
        "specs_desc_2",
        "specs_placeholder",
        "contact_label",
        "contact_desc",
        "contact_placeholder",
        "consent_label",
        SUBMITTING_BUTTON,
        SUBMIT_BUTTON,
    ];
}

// ---------------------------------------------------------------------------
// Embedded dictionaries
// ---------------------------------------------------------------------------

const JA_JSON: &str = include_str!("../dictionaries/ja.json");
const EN_JSON: &str = include_str!("../dictionaries/en.json");

static BUILTIN_JA: LazyLock<BTreeMap<String, String>> =
    LazyLock::new(|| parse_entries(JA_JSON).unwrap_or_default());
static BUILTIN_EN: LazyLock<BTreeMap<String, String>> =
    LazyLock::new(|| parse_entries(EN_JSON).unwrap_or_default());

fn builtin_entries(locale: Locale) -> &'static BTreeMap<String, String> {
    match locale {
        Locale::Ja => &BUILTIN_JA,
        Locale::En => &BUILTIN_EN,
    }
}

fn parse_entries(json: &str) -> Result<BTreeMap<String, String>, CoreError> {
    serde_json::from_str(json).map_err(|e| CoreError::Dictionary(e.to_string()))
}

// ---------------------------------------------------------------------------
// Dictionary
// ---------------------------------------------------------------------------

/// Localized strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dictionary {
    locale: Locale,
    entries: BTreeMap<String, String>,
}

impl Dictionary {
    /// The embedded dictionary for `locale`.
    pub fn builtin(locale: Locale) -> Self {
        Self {
            locale,
            entries: builtin_entries(locale).clone(),
        }
    }

    /// Parse a dictionary file and layer it over the embedded one.
    ///
    /// Fails if the text is not a JSON object of string values.
    pub fn from_json(locale: Locale, json: &str) -> Result<Self, CoreError> {
        let overrides = parse_entries(json)?;
        let mut dictionary = Self::builtin(locale);
        dictionary.entries.extend(overrides);
        Ok(dictionary)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Text for `key`, or the key itself when nothing provides it.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Text for `key` with `{name}` placeholders substituted.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.text(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Required keys this dictionary does not define.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        keys::REQUIRED
            .iter()
            .copied()
            .filter(|k| !self.entries.contains_key(*k))
            .collect()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin(Locale::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
