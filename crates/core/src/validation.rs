//! Submit-time validation of the bug-report form.

use crate::error_set::{ErrorSet, FieldKey};
use crate::fields::FormFields;
use crate::messages::{keys, Dictionary};
use crate::verification::VerificationToken;

/// Check the fields and verification state before a submission.
///
/// A missing token produces only the `form` error; the field rules are not
/// evaluated in that case. Otherwise every field rule is evaluated and all
/// violations are reported together. Only frequency, severity and steps are
/// required.
pub fn validate(
    fields: &FormFields,
    token: Option<&VerificationToken>,
    dictionary: &Dictionary,
) -> ErrorSet {
    let mut errors = ErrorSet::default();

    if token.is_none() {
        errors.set(FieldKey::Form, dictionary.text(keys::ERROR_RECAPTCHA));
        return errors;
    }

    if fields.frequency.is_none() {
        errors.set(
            FieldKey::Frequency,
            dictionary.text(keys::ERROR_FREQUENCY_REQUIRED),
        );
    }
    if fields.severity.is_none() {
        errors.set(
            FieldKey::Severity,
            dictionary.text(keys::ERROR_SEVERITY_REQUIRED),
        );
    }
    if fields.steps.trim().is_empty() {
        errors.set(FieldKey::Steps, dictionary.text(keys::ERROR_STEPS_REQUIRED));
    }

    errors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Frequency, Severity};
    use crate::locale::Locale;

    fn token() -> VerificationToken {
        VerificationToken::new("token").unwrap()
    }

    fn dict() -> Dictionary {
        Dictionary::builtin(Locale::En)
    }

    #[test]
    fn empty_required_fields_report_exactly_three_errors() {
        let errors = validate(&FormFields::default(), Some(&token()), &dict());
        assert_eq!(
            errors.keys(),
            vec![FieldKey::Frequency, FieldKey::Severity, FieldKey::Steps]
        );
    }

    #[test]
    fn complete_fields_with_token_pass() {
        let fields = FormFields {
            frequency: Some(Frequency::Always),
            severity: Some(Severity::Crash),
            steps: "non-empty".into(),
            ..Default::default()
        };
        assert!(validate(&fields, Some(&token()), &dict()).is_empty());
    }

    #[test]
    fn whitespace_only_steps_are_empty() {
        let fields = FormFields {
            frequency: Some(Frequency::Once),
            severity: Some(Severity::Minor),
            steps: " \n\t ".into(),
            ..Default::default()
        };
        assert_eq!(
            validate(&fields, Some(&token()), &dict()).keys(),
            vec![FieldKey::Steps]
        );
    }

    #[test]
    fn missing_token_short_circuits_field_rules() {
        let errors = validate(&FormFields::default(), None, &dict());
        assert_eq!(errors.keys(), vec![FieldKey::Form]);
        assert_eq!(
            errors.get(FieldKey::Form),
            Some(dict().text(keys::ERROR_RECAPTCHA))
        );
    }

    #[test]
    fn optional_fields_never_fail() {
        let fields = FormFields {
            frequency: Some(Frequency::Sometimes),
            severity: Some(Severity::Suggestion),
            steps: "1. open menu".into(),
            name: String::new(),
            contact_info: String::new(),
            consent: false,
            ..Default::default()
        };
        assert!(validate(&fields, Some(&token()), &dict()).is_empty());
    }
}
