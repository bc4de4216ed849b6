//! Screenshot attachment limits and the ingestion plan.
//!
//! [`plan_ingest`] decides what happens to a batch of picked or pasted files
//! before any preview work starts. The stateful side (previews, the
//! collection itself) lives in `tomohigara-client`.

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of screenshots attached to one report.
pub const MAX_ATTACHMENTS: usize = 10;

/// Maximum size of a single screenshot in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Media type prefix a candidate must carry to be considered at all.
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

// ---------------------------------------------------------------------------
// RawFile
// ---------------------------------------------------------------------------

/// A user-supplied file as handed over by the picker or the clipboard.
#[derive(Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Original file name, forwarded with the multipart part.
    pub name: String,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    pub data: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with(IMAGE_MEDIA_PREFIX)
    }
}

impl std::fmt::Debug for RawFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.size())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Ingestion plan
// ---------------------------------------------------------------------------

/// Outcome of checking a batch against the attachment limits.
#[derive(Debug, PartialEq, Eq)]
pub enum IngestPlan {
    /// No image candidates in the batch; nothing changes, no error.
    NoImages,
    /// Adding the in-limit files would exceed [`MAX_ATTACHMENTS`]. The whole
    /// batch is refused.
    OverLimit { existing: usize, accepted: usize },
    /// Files within the size limit, in selection order, plus how many were
    /// too large.
    Accept {
        accepted: Vec<RawFile>,
        oversized: usize,
    },
}

/// Filter, partition and count-check a batch of candidates.
///
/// Non-image candidates are dropped before the size and count checks, so
/// they never contribute to an error.
pub fn plan_ingest(existing: usize, candidates: Vec<RawFile>) -> IngestPlan {
    let images: Vec<RawFile> = candidates.into_iter().filter(RawFile::is_image).collect();
    if images.is_empty() {
        return IngestPlan::NoImages;
    }

    let (accepted, oversized): (Vec<RawFile>, Vec<RawFile>) = images
        .into_iter()
        .partition(|file| file.size() <= MAX_FILE_SIZE);

    if existing + accepted.len() > MAX_ATTACHMENTS {
        return IngestPlan::OverLimit {
            existing,
            accepted: accepted.len(),
        };
    }

    IngestPlan::Accept {
        accepted,
        oversized: oversized.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn png(name: &str, size: usize) -> RawFile {
        RawFile::new(name, "image/png", vec![0; size])
    }

    #[test]
    fn non_images_are_dropped_silently() {
        let batch = vec![
            RawFile::new("notes.txt", "text/plain", vec![1, 2, 3]),
            RawFile::new("crash.log", "application/octet-stream", vec![]),
        ];
        assert_eq!(plan_ingest(0, batch), IngestPlan::NoImages);
    }

    #[test]
    fn non_images_do_not_count_towards_the_limit() {
        let mut batch = vec![png("a.png", 10)];
        batch.extend((0..20).map(|i| RawFile::new(format!("{i}.pdf"), "application/pdf", vec![])));

        assert_matches!(
            plan_ingest(9, batch),
            IngestPlan::Accept { accepted, oversized: 0 } if accepted.len() == 1
        );
    }

    #[test]
    fn oversized_files_are_excluded_but_counted() {
        let batch = vec![
            png("small.png", 100),
            png("huge.png", (MAX_FILE_SIZE + 1) as usize),
            png("exact.png", MAX_FILE_SIZE as usize),
        ];

        assert_matches!(
            plan_ingest(0, batch),
            IngestPlan::Accept { accepted, oversized: 1 }
                if accepted.iter().map(|f| f.name.as_str()).collect::<Vec<_>>() == ["small.png", "exact.png"]
        );
    }

    #[test]
    fn exceeding_the_count_refuses_the_batch() {
        let batch = vec![png("a.png", 1), png("b.png", 1), png("c.png", 1)];
        assert_eq!(
            plan_ingest(8, batch),
            IngestPlan::OverLimit {
                existing: 8,
                accepted: 3
            }
        );
    }

    #[test]
    fn reaching_the_count_exactly_is_allowed() {
        let batch = vec![png("a.png", 1), png("b.png", 1)];
        assert_matches!(plan_ingest(8, batch), IngestPlan::Accept { .. });
    }

    #[test]
    fn oversized_files_do_not_count_towards_the_limit() {
        let batch = vec![png("a.png", 1), png("big.png", (MAX_FILE_SIZE + 1) as usize)];
        assert_matches!(
            plan_ingest(9, batch),
            IngestPlan::Accept { oversized: 1, .. }
        );
    }
}
