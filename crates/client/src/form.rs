//! The bug-report form state machine and submission controller.
//!
//! [`BugReportForm`] owns the field store, the error set, the screenshot
//! collection, the verification token and the submission status. A submit
//! runs in two halves around the network call:
//!
//! 1. [`BugReportForm::begin_submit`] validates, moves to `submitting` and
//!    builds the payload;
//! 2. [`PendingSubmission::run`] sends it while a minimum-display timer
//!    runs, and waits for both;
//! 3. [`BugReportForm::finish_submit`] applies the outcome.
//!
//! [`BugReportForm::submit`] chains the three. The split lets a shared
//! handle release its lock while the request is in flight.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use tomohigara_core::attachment::RawFile;
use tomohigara_core::error_set::{ErrorSet, FieldKey};
use tomohigara_core::fields::FormFields;
use tomohigara_core::locale::Locale;
use tomohigara_core::messages::{keys, Dictionary};
use tomohigara_core::status::SubmissionStatus;
use tomohigara_core::validation::validate;
use tomohigara_core::verification::VerificationToken;

use crate::attachments::{AttachmentManager, IngestReport};
use crate::payload::SubmissionPayload;
use crate::preview::PreviewGenerator;
use crate::transport::{SubmissionTransport, SubmitError};
use crate::verification::VerificationWidget;

/// Default lower bound on how long the "submitting" state is shown.
pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_millis(3000);

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a submit trigger did not start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// A submission is already in flight.
    InFlight,
    /// Validation or verification failed; see the error set.
    Invalid,
}

/// Result of one submit trigger.
#[derive(Debug)]
pub enum SubmitOutcome {
    Rejected(SubmitRejection),
    Success,
    Failed(SubmitError),
}

/// Text for the centered panel shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessPanel {
    pub title: String,
    pub message: String,
    pub button: String,
}

// ---------------------------------------------------------------------------
// PendingSubmission
// ---------------------------------------------------------------------------

/// A validated submission waiting to be sent.
pub struct PendingSubmission {
    payload: SubmissionPayload,
    transport: Arc<dyn SubmissionTransport>,
    min_display: Duration,
}

impl PendingSubmission {
    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }

    /// Send the payload and wait for both the request and the
    /// minimum-display timer to settle.
    pub async fn run(self) -> Result<(), SubmitError> {
        let (result, ()) = tokio::join!(
            self.transport.send(self.payload),
            tokio::time::sleep(self.min_display),
        );
        result
    }
}

impl std::fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("payload", &self.payload)
            .field("min_display", &self.min_display)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// BugReportForm
// ---------------------------------------------------------------------------

pub struct BugReportForm {
    fields: FormFields,
    errors: ErrorSet,
    status: SubmissionStatus,
    token: Option<VerificationToken>,
    attachments: AttachmentManager,
    locale: Locale,
    dictionary: Dictionary,
    transport: Arc<dyn SubmissionTransport>,
    widget: Arc<dyn VerificationWidget>,
    min_display: Duration,
}

impl BugReportForm {
    pub fn new(
        locale: Locale,
        dictionary: Dictionary,
        transport: Arc<dyn SubmissionTransport>,
        widget: Arc<dyn VerificationWidget>,
        previewer: Arc<dyn PreviewGenerator>,
    ) -> Self {
        Self {
            fields: FormFields::default(),
            errors: ErrorSet::default(),
            status: SubmissionStatus::Idle,
            token: None,
            attachments: AttachmentManager::new(previewer),
            locale,
            dictionary,
            transport,
            widget,
            min_display: DEFAULT_MIN_DISPLAY,
        }
    }

    pub fn with_min_display(mut self, min_display: Duration) -> Self {
        self.min_display = min_display;
        self
    }

    // ---- accessors ----

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Field store for user edits.
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn attachments(&self) -> &AttachmentManager {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut AttachmentManager {
        &mut self.attachments
    }

    pub fn is_verified(&self) -> bool {
        self.token.is_some()
    }

    // ---- verification widget callbacks ----

    pub fn on_verified(&mut self, token: VerificationToken) {
        self.token = Some(token);
    }

    pub fn on_expired(&mut self) {
        self.token = None;
    }

    // ---- attachments ----

    /// Add picked or pasted screenshots. Ignored while a submission is in
    /// flight, since the payload is already built.
    pub async fn ingest(&mut self, files: Vec<RawFile>) -> IngestReport {
        if self.status == SubmissionStatus::Submitting {
            tracing::debug!(files = files.len(), "Screenshots ignored: submission in flight");
            return IngestReport::default();
        }
        self.attachments
            .ingest(files, &mut self.errors, &self.dictionary)
            .await
    }

    pub fn delete_attachment(&mut self, index: usize) -> Option<RawFile> {
        self.attachments.delete(index)
    }

    pub fn clear_attachments(&mut self) {
        self.attachments.clear();
    }

    // ---- submission ----

    /// Validate and, if everything is in order, enter `submitting` and hand
    /// back the request to send.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitRejection> {
        if !self.status.accepts_submit() {
            tracing::debug!("Submit ignored: submission already in flight");
            return Err(SubmitRejection::InFlight);
        }

        let errors = validate(&self.fields, self.token.as_ref(), &self.dictionary);
        let Some(token) = self.token.as_ref().filter(|_| errors.is_empty()) else {
            tracing::debug!(keys = ?errors.keys(), "Submit blocked by validation");
            self.errors = errors;
            return Err(SubmitRejection::Invalid);
        };

        let payload = SubmissionPayload::build(
            &self.fields,
            self.locale,
            token,
            self.attachments.attachments().iter().map(|a| &a.file),
        );

        self.errors = ErrorSet::default();
        self.status = SubmissionStatus::Submitting;

        tracing::info!(
            locale = %self.locale,
            attachments = payload.files.len(),
            "Submitting bug report",
        );

        Ok(PendingSubmission {
            payload,
            transport: Arc::clone(&self.transport),
            min_display: self.min_display,
        })
    }

    /// Apply the result of a request started by [`Self::begin_submit`].
    ///
    /// Success resets the fields, screenshots and token. Failure keeps the
    /// fields so the user can retry, and sets the form-level error. Either
    /// way the user has to verify again.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        self.token = None;
        self.widget.reset();

        match result {
            Ok(()) => {
                tracing::info!("Bug report submitted");
                self.status = SubmissionStatus::Success;
                self.fields = FormFields::default();
                self.attachments.clear();
                SubmitOutcome::Success
            }
            Err(err) => {
                tracing::warn!(error = %err, "Bug report submission failed");
                let key = match &err {
                    SubmitError::Server { .. } => keys::ERROR_SERVER,
                    SubmitError::Timeout => keys::ERROR_TIMEOUT,
                    SubmitError::Network(_) | SubmitError::Encoding(_) => keys::ERROR_NETWORK,
                };
                self.status = SubmissionStatus::Error;
                self.errors.set(FieldKey::Form, self.dictionary.text(key));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Run a full submission cycle.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let result = pending.run().await;
                self.finish_submit(result)
            }
            Err(rejection) => SubmitOutcome::Rejected(rejection),
        }
    }

    /// Close the success panel and show an empty form again.
    pub fn dismiss_success(&mut self) {
        if self.status == SubmissionStatus::Success {
            self.status = SubmissionStatus::Idle;
        }
    }

    // ---- view helpers ----

    pub fn is_submit_disabled(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn submit_label(&self) -> &str {
        if self.is_submit_disabled() {
            self.dictionary.text(keys::SUBMITTING_BUTTON)
        } else {
            self.dictionary.text(keys::SUBMIT_BUTTON)
        }
    }

    pub fn success_panel(&self) -> Option<SuccessPanel> {
        (self.status == SubmissionStatus::Success).then(|| SuccessPanel {
            title: self.dictionary.text(keys::SUBMIT_SUCCESS_TITLE).to_string(),
            message: self.dictionary.text(keys::SUBMIT_SUCCESS_MESSAGE).to_string(),
            button: self.dictionary.text(keys::SUBMIT_ANOTHER_BUTTON).to_string(),
        })
    }

    /// `aria-label` of the delete button on the screenshot at `index`.
    pub fn delete_label(&self, index: usize) -> String {
        self.dictionary.format(
            keys::SCREENSHOT_DELETE_ARIA,
            &[("n", &(index + 1).to_string())],
        )
    }
}

impl std::fmt::Debug for BugReportForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BugReportForm")
            .field("status", &self.status)
            .field("locale", &self.locale)
            .field("fields", &self.fields)
            .field("errors", &self.errors)
            .field("attachments", &self.attachments.len())
            .field("verified", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
