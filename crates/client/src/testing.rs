//! Test doubles shared by the unit tests of this crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use tomohigara_core::fields::{Frequency, Severity};
use tomohigara_core::locale::Locale;
use tomohigara_core::messages::Dictionary;
use tomohigara_core::verification::VerificationToken;

use crate::form::BugReportForm;
use crate::payload::SubmissionPayload;
use crate::preview::{DataUriPreviewer, ObjectUrlPreviewer, ObjectUrlRegistry};
use crate::transport::{SubmissionTransport, SubmitError};
use crate::verification::VerificationWidget;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Reply {
    Ok,
    Status(u16),
    Timeout,
}

/// Records every payload and answers after a fixed latency.
pub(crate) struct FakeTransport {
    latency: Duration,
    reply: Reply,
    sent: Mutex<Vec<SubmissionPayload>>,
}

impl FakeTransport {
    pub(crate) fn new(latency: Duration, reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            latency,
            reply,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn sent(&self) -> Vec<SubmissionPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionTransport for FakeTransport {
    async fn send(&self, payload: SubmissionPayload) -> Result<(), SubmitError> {
        tokio::time::sleep(self.latency).await;
        self.sent.lock().unwrap().push(payload);
        match self.reply {
            Reply::Ok => Ok(()),
            Reply::Status(status) => Err(SubmitError::Server {
                status,
                body: "rejected".into(),
            }),
            Reply::Timeout => Err(SubmitError::Timeout),
        }
    }
}

/// Counts widget resets.
#[derive(Default)]
pub(crate) struct CountingWidget {
    resets: AtomicUsize,
}

impl CountingWidget {
    pub(crate) fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl VerificationWidget for CountingWidget {
    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn form(transport: Arc<FakeTransport>, widget: Arc<CountingWidget>) -> BugReportForm {
    BugReportForm::new(
        Locale::En,
        Dictionary::builtin(Locale::En),
        transport,
        widget,
        Arc::new(DataUriPreviewer),
    )
}

/// Like [`form`], but previews are object URLs tracked by the returned
/// registry.
pub(crate) fn form_with_object_urls(
    transport: Arc<FakeTransport>,
    widget: Arc<CountingWidget>,
) -> (BugReportForm, ObjectUrlRegistry) {
    let registry = ObjectUrlRegistry::new();
    let form = BugReportForm::new(
        Locale::En,
        Dictionary::builtin(Locale::En),
        transport,
        widget,
        Arc::new(ObjectUrlPreviewer::new(registry.clone())),
    );
    (form, registry)
}

/// Fill the required fields and verify.
pub(crate) fn fill(form: &mut BugReportForm) {
    let fields = form.fields_mut();
    fields.frequency = Some(Frequency::Always);
    fields.severity = Some(Severity::Crash);
    fields.steps = "Open the map twice".into();
    fields.game_version = "1.0.2".into();
    form.on_verified(VerificationToken::new("token-1").unwrap());
}
