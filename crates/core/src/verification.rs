//! Anti-bot verification token.

use std::fmt;

use crate::error::CoreError;

/// Multipart key under which the form backend expects the challenge response.
pub const TOKEN_FIELD: &str = "g-recaptcha-response";

/// Opaque proof that the user passed the anti-bot challenge.
///
/// Never empty. The `Debug` output is redacted so tokens do not end up in
/// logs.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::Validation(
                "Verification token must not be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_rejected() {
        assert!(VerificationToken::new("").is_err());
        assert!(VerificationToken::new("   ").is_err());
    }

    #[test]
    fn debug_output_hides_the_value() {
        let token = VerificationToken::new("03AGdBq2").unwrap();
        assert_eq!(token.as_str(), "03AGdBq2");
        assert!(!format!("{token:?}").contains("03AGdBq2"));
    }
}
