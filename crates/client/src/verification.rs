//! Anti-bot widget seam.
//!
//! The widget itself lives in the page (reCAPTCHA). The form reacts to its
//! `verified` / `expired` callbacks and asks it to reset after every
//! terminal submission outcome.

/// The imperative side of the anti-bot widget.
pub trait VerificationWidget: Send + Sync {
    /// Clear the challenge so the user has to verify again.
    fn reset(&self);
}

/// Widget stand-in for headless use, where the token comes from elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessWidget;

impl VerificationWidget for HeadlessWidget {
    fn reset(&self) {
        tracing::debug!("Verification reset requested (headless)");
    }
}
