//! Screenshot preview generation and preview resource ownership.
//!
//! A preview is either an inline `data:` URI, which needs no cleanup, or a
//! revocable `blob:` object URL registered in an [`ObjectUrlRegistry`].
//! Both are held as a [`PreviewResource`]; dropping the resource releases
//! whatever it holds, so every path that removes an attachment (delete,
//! clear, reset, teardown) releases its preview.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use base64::Engine;

use tomohigara_core::attachment::RawFile;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The bytes could not be read as an image.
    #[error("Image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image could not be read: {0}")]
    Io(#[from] std::io::Error),

    /// The background decoding task panicked or was cancelled.
    #[error("Preview task failed: {0}")]
    Task(String),
}

// ---------------------------------------------------------------------------
// Object URL registry
// ---------------------------------------------------------------------------

/// Live `blob:` URLs and the size of the data behind each.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    live: Arc<Mutex<HashMap<String, u64>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register `file` and return an owning handle to its URL.
    pub fn create(&self, file: &RawFile) -> ObjectUrl {
        let url = format!("blob:tomohigara/{}", uuid::Uuid::new_v4());
        self.entries().insert(url.clone(), file.size());
        ObjectUrl {
            url,
            registry: self.clone(),
        }
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.entries().contains_key(url)
    }

    pub fn live_count(&self) -> usize {
        self.entries().len()
    }

    fn revoke(&self, url: &str) {
        if self.entries().remove(url).is_some() {
            tracing::debug!(url, "Revoked preview object URL");
        }
    }
}

/// Owning handle to a registered object URL; revoked on drop.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    registry: ObjectUrlRegistry,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

// ---------------------------------------------------------------------------
// PreviewResource
// ---------------------------------------------------------------------------

/// Displayable preview of one attachment.
#[derive(Debug)]
pub enum PreviewResource {
    /// `data:` URI. Nothing to release.
    Inline(String),
    /// Registered `blob:` URL. Revoked when the resource is dropped.
    ObjectUrl(ObjectUrl),
}

impl PreviewResource {
    /// Value for the preview `<img src>`.
    pub fn src(&self) -> &str {
        match self {
            PreviewResource::Inline(uri) => uri,
            PreviewResource::ObjectUrl(url) => url.as_str(),
        }
    }

    pub fn is_revocable(&self) -> bool {
        matches!(self, PreviewResource::ObjectUrl(_))
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Derives a preview for an accepted screenshot.
#[async_trait]
pub trait PreviewGenerator: Send + Sync {
    async fn generate(&self, file: &RawFile) -> Result<PreviewResource, PreviewError>;
}

/// Encodes the whole file as a base64 `data:` URI.
///
/// The bytes are never decoded; any `image/*` file the browser could show
/// gets a preview. The header is read only to log the dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriPreviewer;

#[async_trait]
impl PreviewGenerator for DataUriPreviewer {
    async fn generate(&self, file: &RawFile) -> Result<PreviewResource, PreviewError> {
        let media_type = file.media_type.clone();
        let data = file.data.clone();

        tokio::task::spawn_blocking(move || {
            match read_dimensions(&data) {
                Ok((width, height)) => {
                    tracing::debug!(%media_type, width, height, "Encoding screenshot preview");
                }
                Err(e) => {
                    tracing::debug!(%media_type, error = %e, "Screenshot header not recognised");
                }
            }
            let encoded = base64::engine::general_purpose::STANDARD.encode(&data);
            Ok::<_, PreviewError>(PreviewResource::Inline(format!(
                "data:{media_type};base64,{encoded}"
            )))
        })
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))?
    }
}

/// Registers the file as an object URL without decoding it.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlPreviewer {
    registry: ObjectUrlRegistry,
}

impl ObjectUrlPreviewer {
    pub fn new(registry: ObjectUrlRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl PreviewGenerator for ObjectUrlPreviewer {
    async fn generate(&self, file: &RawFile) -> Result<PreviewResource, PreviewError> {
        Ok(PreviewResource::ObjectUrl(self.registry.create(file)))
    }
}

/// Read only the image header to get its dimensions.
pub fn read_dimensions(data: &[u8]) -> Result<(u32, u32), PreviewError> {
    let dimensions = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dimensions)
}

/// Smallest valid GIF: 1x1, two-colour palette.
#[cfg(test)]
pub(crate) const TINY_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
