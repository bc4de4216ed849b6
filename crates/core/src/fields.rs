//! Bug-report field values and their wire names.
//!
//! [`FormFields`] is the field store: the live values of every editable
//! control. The active language is not part of it; the controller adds it
//! when the payload is assembled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Wire names
// ---------------------------------------------------------------------------

/// Discriminator identifying this form to the form-processing backend.
pub const FORM_NAME: &str = "game-bug-report";

pub const FIELD_FORM_NAME: &str = "form-name";
/// Hidden decoy input; real users never fill it in.
pub const FIELD_HONEYPOT: &str = "bot-field";
pub const FIELD_NAME: &str = "name";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_FREQUENCY: &str = "frequency";
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_STEPS: &str = "steps";
pub const FIELD_EXPECTED_BEHAVIOR: &str = "expectedBehavior";
pub const FIELD_GAME_VERSION: &str = "gameVersion";
pub const FIELD_OS: &str = "os";
pub const FIELD_PC_SPECS: &str = "pcSpecs";
pub const FIELD_CONTACT_INFO: &str = "contactInfo";
pub const FIELD_CONSENT: &str = "consent";
pub const FIELD_LANGUAGE: &str = "language";
/// Repeated once per attachment.
pub const FIELD_SCREENSHOT: &str = "screenshot";

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// How often the reported problem happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Always,
    Sometimes,
    Once,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Always, Frequency::Sometimes, Frequency::Once];

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Always => "always",
            Frequency::Sometimes => "sometimes",
            Frequency::Once => "once",
        }
    }

    /// Dictionary key of the option label.
    pub fn label_key(self) -> &'static str {
        match self {
            Frequency::Always => "frequency_always",
            Frequency::Sometimes => "frequency_sometimes",
            Frequency::Once => "frequency_once",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                entity: "frequency",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How badly the problem affects play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Crash,
    Blocking,
    Minor,
    Suggestion,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Crash,
        Severity::Blocking,
        Severity::Minor,
        Severity::Suggestion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Crash => "crash",
            Severity::Blocking => "blocking",
            Severity::Minor => "minor",
            Severity::Suggestion => "suggestion",
        }
    }

    /// Dictionary key of the option label.
    pub fn label_key(self) -> &'static str {
        match self {
            Severity::Crash => "severity_crash",
            Severity::Blocking => "severity_blocking",
            Severity::Minor => "severity_minor",
            Severity::Suggestion => "severity_suggestion",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                entity: "severity",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// FormFields
// ---------------------------------------------------------------------------

/// Current values of all user-editable bug-report controls.
///
/// `frequency` and `severity` are `None` until the user picks an option,
/// which is what the empty placeholder `<option>` maps to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub name: String,
    pub message: String,
    pub frequency: Option<Frequency>,
    pub severity: Option<Severity>,
    pub steps: String,
    pub expected_behavior: String,
    pub game_version: String,
    pub operating_system: String,
    pub pc_specs: String,
    pub contact_info: String,
    pub consent: bool,
}

impl FormFields {
    /// Text parts in wire order, excluding the discriminator, honeypot,
    /// language and verification token.
    pub fn wire_values(&self) -> Vec<(&'static str, String)> {
        vec![
            (FIELD_NAME, self.name.clone()),
            (FIELD_MESSAGE, self.message.clone()),
            (
                FIELD_FREQUENCY,
                self.frequency.map(|f| f.as_str()).unwrap_or_default().to_string(),
            ),
            (
                FIELD_SEVERITY,
                self.severity.map(|s| s.as_str()).unwrap_or_default().to_string(),
            ),
            (FIELD_STEPS, self.steps.clone()),
            (FIELD_EXPECTED_BEHAVIOR, self.expected_behavior.clone()),
            (FIELD_GAME_VERSION, self.game_version.clone()),
            (FIELD_OS, self.operating_system.clone()),
            (FIELD_PC_SPECS, self.pc_specs.clone()),
            (FIELD_CONTACT_INFO, self.contact_info.clone()),
            (FIELD_CONSENT, self.consent.to_string()),
        ]
    }

    /// Set the frequency from a `<select>` value; `""` clears it.
    pub fn set_frequency(&mut self, value: &str) -> Result<(), CoreError> {
        self.frequency = if value.is_empty() {
            None
        } else {
            Some(value.parse()?)
        };
        Ok(())
    }

    /// Set the severity from a `<select>` value; `""` clears it.
    pub fn set_severity(&mut self, value: &str) -> Result<(), CoreError> {
        self.severity = if value.is_empty() {
            None
        } else {
            Some(value.parse()?)
        };
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn enums_parse_their_wire_strings() {
        for f in Frequency::ALL {
            assert_eq!(f.as_str().parse::<Frequency>().unwrap(), f);
        }
        for s in Severity::ALL {
            assert_eq!(s.as_str().parse::<Severity>().unwrap(), s);
        }
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        assert_matches!(
            "often".parse::<Frequency>(),
            Err(CoreError::UnknownValue { entity: "frequency", .. })
        );
        assert_matches!(
            "Crash".parse::<Severity>(),
            Err(CoreError::UnknownValue { entity: "severity", .. })
        );
    }

    #[test]
    fn empty_select_value_clears_the_option() {
        let mut fields = FormFields::default();
        fields.set_frequency("once").unwrap();
        assert_eq!(fields.frequency, Some(Frequency::Once));
        fields.set_frequency("").unwrap();
        assert_eq!(fields.frequency, None);
    }

    #[test]
    fn invalid_select_value_keeps_previous_option() {
        let mut fields = FormFields::default();
        fields.set_severity("minor").unwrap();
        assert!(fields.set_severity("fatal").is_err());
        assert_eq!(fields.severity, Some(Severity::Minor));
    }

    #[test]
    fn wire_values_render_unset_options_as_empty_strings() {
        let fields = FormFields {
            steps: "open the door".into(),
            consent: true,
            ..Default::default()
        };
        let values = fields.wire_values();

        let get = |key: &str| {
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get(FIELD_FREQUENCY), "");
        assert_eq!(get(FIELD_SEVERITY), "");
        assert_eq!(get(FIELD_STEPS), "open the door");
        assert_eq!(get(FIELD_CONSENT), "true");
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn fields_deserialize_with_defaults_for_missing_keys() {
        let fields: FormFields =
            serde_json::from_str(r#"{"steps":"x","severity":"crash"}"#).unwrap();
        assert_eq!(fields.severity, Some(Severity::Crash));
        assert_eq!(fields.frequency, None);
        assert!(!fields.consent);
    }
}
