//! Screenshot collection: ingestion, preview lifecycle, deletion.
//!
//! [`AttachmentManager`] owns every [`Attachment`] and its preview. The
//! collection only changes through `&mut self`, and a batch is merged in
//! one step after all of its previews resolved, so no partial batch is ever
//! observable.

use std::sync::Arc;

use futures::future::join_all;

use tomohigara_core::attachment::{plan_ingest, IngestPlan, RawFile};
use tomohigara_core::error_set::{ErrorSet, FieldKey};
use tomohigara_core::messages::{keys, Dictionary};

use crate::preview::{PreviewGenerator, PreviewResource};

/// One user-supplied image and its preview.
#[derive(Debug)]
pub struct Attachment {
    pub file: RawFile,
    pub preview: PreviewResource,
}

/// Raw value of the hidden `<input type="file">`.
///
/// Resetting it lets the user pick the same files again and still get a
/// change event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilePicker {
    selected: Vec<String>,
}

impl FilePicker {
    /// Record a selection, as the browser does before the change event.
    pub fn select(&mut self, names: impl IntoIterator<Item = String>) {
        self.selected = names.into_iter().collect();
    }

    pub fn value(&self) -> &[String] {
        &self.selected
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }
}

/// What an ingestion batch did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    pub added: usize,
    pub oversized: usize,
    pub failed_previews: usize,
    pub refused: bool,
}

/// The screenshot collection of one form instance.
pub struct AttachmentManager {
    items: Vec<Attachment>,
    picker: FilePicker,
    previewer: Arc<dyn PreviewGenerator>,
}

impl AttachmentManager {
    pub fn new(previewer: Arc<dyn PreviewGenerator>) -> Self {
        Self {
            items: Vec::new(),
            picker: FilePicker::default(),
            previewer,
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut FilePicker {
        &mut self.picker
    }

    /// Add a batch of picked or pasted files.
    ///
    /// Only the `file` slot of `errors` is touched. Non-images are dropped
    /// silently; a batch that would exceed the count limit is refused as a
    /// whole; oversized files are skipped with an error while the rest are
    /// still added.
    pub async fn ingest(
        &mut self,
        candidates: Vec<RawFile>,
        errors: &mut ErrorSet,
        dictionary: &Dictionary,
    ) -> IngestReport {
        let (accepted, oversized) = match plan_ingest(self.items.len(), candidates) {
            IngestPlan::NoImages => return IngestReport::default(),
            IngestPlan::OverLimit { existing, accepted } => {
                tracing::info!(existing, accepted, "Screenshot batch refused: too many images");
                errors.set(FieldKey::File, dictionary.text(keys::ERROR_FILE_LIMIT));
                self.picker.reset();
                return IngestReport {
                    refused: true,
                    ..Default::default()
                };
            }
            IngestPlan::Accept {
                accepted,
                oversized,
            } => (accepted, oversized),
        };

        if oversized > 0 {
            let mut message = dictionary.text(keys::ERROR_FILE_SIZE).to_string();
            if !accepted.is_empty() {
                message.push_str(dictionary.text(keys::ERROR_FILE_SIZE_PARTIAL));
            }
            errors.set(FieldKey::File, message);
        } else {
            errors.clear(FieldKey::File);
        }

        if accepted.is_empty() {
            self.picker.reset();
            return IngestReport {
                oversized,
                ..Default::default()
            };
        }

        let previewer = Arc::clone(&self.previewer);
        let results = join_all(accepted.into_iter().map(|file| {
            let previewer = Arc::clone(&previewer);
            async move {
                let result = previewer.generate(&file).await;
                match result {
                    Ok(preview) => Some(Attachment { file, preview }),
                    Err(e) => {
                        tracing::warn!(file = %file.name, error = %e, "Screenshot preview failed");
                        None
                    }
                }
            }
        }))
        .await;

        let requested = results.len();
        let batch: Vec<Attachment> = results.into_iter().flatten().collect();
        let failed_previews = requested - batch.len();

        if failed_previews > 0 && !errors.contains(FieldKey::File) {
            errors.set(FieldKey::File, dictionary.text(keys::ERROR_FILE_PREVIEW));
        }

        let added = batch.len();
        self.items.extend(batch);

        tracing::debug!(
            added,
            oversized,
            failed_previews,
            total = self.items.len(),
            "Screenshots ingested",
        );

        IngestReport {
            added,
            oversized,
            failed_previews,
            refused: false,
        }
    }

    /// Remove the attachment at `index`, releasing its preview.
    ///
    /// Returns the removed file; `None` for an out-of-range index.
    pub fn delete(&mut self, index: usize) -> Option<RawFile> {
        if index >= self.items.len() {
            return None;
        }
        let Attachment { file, preview } = self.items.remove(index);
        drop(preview);
        Some(file)
    }

    /// Release every preview, empty the collection and reset the picker.
    pub fn clear(&mut self) {
        self.items.clear();
        self.picker.reset();
    }
}

impl std::fmt::Debug for AttachmentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentManager")
            .field("items", &self.items)
            .field("picker", &self.picker)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
