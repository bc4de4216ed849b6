//! A form mounted on a page: shared state plus the clipboard paste listener.
//!
//! The listener is spawned exactly once at mount and reads the form through
//! the shared handle, so it always sees the current screenshot count. It
//! stops on [`MountedForm::teardown`] or when the mount is dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use tomohigara_core::attachment::RawFile;

use crate::form::{BugReportForm, SubmitOutcome};

/// Capacity of the paste channel. Pastes are user-driven so this is plenty.
const PASTE_BUFFER: usize = 16;

/// Feeds pasted clipboard files to a mounted form.
pub type PasteSender = mpsc::Sender<Vec<RawFile>>;

pub struct MountedForm {
    form: Arc<Mutex<BugReportForm>>,
    paste_tx: PasteSender,
    cancel: CancellationToken,
    listener: JoinHandle<()>,
}

impl MountedForm {
    /// Mount `form` and start listening for pastes. Must be called from
    /// within a Tokio runtime.
    pub fn mount(form: BugReportForm) -> Self {
        let form = Arc::new(Mutex::new(form));
        let (paste_tx, paste_rx) = mpsc::channel(PASTE_BUFFER);
        let cancel = CancellationToken::new();

        let listener = tokio::spawn(listen_for_pastes(
            Arc::clone(&form),
            paste_rx,
            cancel.clone(),
        ));

        tracing::debug!("Bug report form mounted");

        Self {
            form,
            paste_tx,
            cancel,
            listener,
        }
    }

    /// Shared handle to the form state.
    pub fn form(&self) -> Arc<Mutex<BugReportForm>> {
        Arc::clone(&self.form)
    }

    pub fn paste_sender(&self) -> PasteSender {
        self.paste_tx.clone()
    }

    /// Submit without holding the form lock during the request, so pastes
    /// and a repeated submit trigger observe `submitting` meanwhile.
    pub async fn submit(&self) -> SubmitOutcome {
        let pending = self.form.lock().await.begin_submit();
        match pending {
            Ok(pending) => {
                let result = pending.run().await;
                self.form.lock().await.finish_submit(result)
            }
            Err(rejection) => SubmitOutcome::Rejected(rejection),
        }
    }

    /// Stop the paste listener and release every preview.
    pub async fn teardown(mut self) {
        self.cancel.cancel();
        if let Err(e) = (&mut self.listener).await {
            tracing::error!(error = %e, "Paste listener ended abnormally");
        }
        self.form.lock().await.clear_attachments();
        tracing::debug!("Bug report form unmounted");
    }
}

impl Drop for MountedForm {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn listen_for_pastes(
    form: Arc<Mutex<BugReportForm>>,
    mut paste_rx: mpsc::Receiver<Vec<RawFile>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Paste listener stopping");
                break;
            }
            batch = paste_rx.recv() => {
                let Some(files) = batch else { break };
                let mut form = form.lock().await;
                let report = form.ingest(files).await;
                tracing::debug!(?report, "Pasted files handled");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
