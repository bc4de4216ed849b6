//! Submission status state machine.

use std::fmt;

use serde::Serialize;

/// Where the form is in its submit cycle.
///
/// - `Idle`       -> `Submitting` (validation passed, token present)
/// - `Submitting` -> `Success` | `Error`
/// - `Success`    -> `Idle` (success panel dismissed)
/// - `Error`      -> `Submitting` (retry)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }

    /// Whether a new submission may start from this status.
    pub fn accepts_submit(self) -> bool {
        self != SubmissionStatus::Submitting
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
