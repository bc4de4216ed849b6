//! Multipart payload assembled for one bug-report submission.

use tomohigara_core::attachment::RawFile;
use tomohigara_core::fields::{
    FormFields, FIELD_FORM_NAME, FIELD_HONEYPOT, FIELD_LANGUAGE, FIELD_SCREENSHOT, FORM_NAME,
};
use tomohigara_core::locale::Locale;
use tomohigara_core::verification::{VerificationToken, TOKEN_FIELD};

/// A file part of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Multipart field name; every screenshot shares the same one.
    pub field: &'static str,
    pub file: RawFile,
}

/// Everything sent to the form backend, in wire order.
///
/// Kept independent of the HTTP client so transports and tests can inspect
/// it; [`SubmissionPayload::into_multipart`] produces the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub text: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl SubmissionPayload {
    pub fn build<'a>(
        fields: &FormFields,
        locale: Locale,
        token: &VerificationToken,
        screenshots: impl IntoIterator<Item = &'a RawFile>,
    ) -> Self {
        let mut text: Vec<(String, String)> = vec![
            (FIELD_FORM_NAME.into(), FORM_NAME.into()),
            (FIELD_HONEYPOT.into(), String::new()),
        ];
        text.extend(
            fields
                .wire_values()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v)),
        );
        text.push((FIELD_LANGUAGE.into(), locale.code().into()));
        text.push((TOKEN_FIELD.into(), token.as_str().into()));

        let files = screenshots
            .into_iter()
            .map(|file| FilePart {
                field: FIELD_SCREENSHOT,
                file: file.clone(),
            })
            .collect();

        Self { text, files }
    }

    /// Value of the first text part named `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.text
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert into a `reqwest` multipart form.
    ///
    /// Fails only if a file's declared media type is not a valid MIME string.
    pub fn into_multipart(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.text {
            form = form.text(name, value);
        }
        for FilePart { field, file } in self.files {
            let part = reqwest::multipart::Part::bytes(file.data)
                .file_name(file.name)
                .mime_str(&file.media_type)?;
            form = form.part(field, part);
        }
        Ok(form)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
