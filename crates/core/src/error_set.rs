//! Per-field error messages shown next to the form controls.

use std::fmt;

use serde::Serialize;

/// A slot in the [`ErrorSet`].
///
/// `File` and `Form` are synthetic: `File` belongs to the screenshot picker,
/// `Form` is the banner used for verification and submission failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Frequency,
    Severity,
    Steps,
    File,
    Form,
}

impl FieldKey {
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Frequency,
        FieldKey::Severity,
        FieldKey::Steps,
        FieldKey::File,
        FieldKey::Form,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Frequency => "frequency",
            FieldKey::Severity => "severity",
            FieldKey::Steps => "steps",
            FieldKey::File => "file",
            FieldKey::Form => "form",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current validation and submission errors, one optional message per key.
///
/// A set slot means that control currently fails; slots are independent, so
/// clearing `file` never touches `steps` or `form`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
}

impl ErrorSet {
    fn slot(&self, key: FieldKey) -> &Option<String> {
        match key {
            FieldKey::Frequency => &self.frequency,
            FieldKey::Severity => &self.severity,
            FieldKey::Steps => &self.steps,
            FieldKey::File => &self.file,
            FieldKey::Form => &self.form,
        }
    }

    fn slot_mut(&mut self, key: FieldKey) -> &mut Option<String> {
        match key {
            FieldKey::Frequency => &mut self.frequency,
            FieldKey::Severity => &mut self.severity,
            FieldKey::Steps => &mut self.steps,
            FieldKey::File => &mut self.file,
            FieldKey::Form => &mut self.form,
        }
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    pub fn set(&mut self, key: FieldKey, message: impl Into<String>) {
        *self.slot_mut(key) = Some(message.into());
    }

    pub fn clear(&mut self, key: FieldKey) {
        *self.slot_mut(key) = None;
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.slot(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        FieldKey::ALL.iter().all(|k| !self.contains(*k))
    }

    /// Keys that currently carry a message, in declaration order.
    pub fn keys(&self) -> Vec<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .filter(|k| self.contains(*k))
            .collect()
    }

    /// Value for the control's `aria-invalid` attribute.
    pub fn aria_invalid(&self, key: FieldKey) -> bool {
        self.contains(key)
    }

    /// Element id for the control's `aria-describedby`, present only while
    /// the slot is set.
    pub fn described_by(&self, key: FieldKey) -> Option<String> {
        self.contains(key).then(|| format!("{key}-error"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
