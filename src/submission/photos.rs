//! Staged photo attachments and their preview handles.
//!
//! A staged photo owns a [`PreviewHandle`] for as long as it sits in a
//! draft. Handles are released when the photo is removed, when the upload
//! succeeds, or when the draft is discarded; the shared [`PreviewTracker`]
//! counts the ones still alive.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use uuid::Uuid;

use crate::api::PhotoUpload;
use crate::error::ValidationError;

/// Most photos a single comment may carry, existing and new together.
pub const MAX_PHOTOS: usize = 7;

/// Canonical MIME type for an accepted photo, or the validation error for
/// anything else. `image/jpg` is taken as JPEG.
pub fn accepted_mime(mime: &str) -> Result<&'static str, ValidationError> {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Ok("image/jpeg"),
        "image/png" => Ok("image/png"),
        _ => Err(ValidationError::UnsupportedPhotoType {
            mime: mime.to_string(),
        }),
    }
}

/// Guess a MIME type from a file extension.
pub fn mime_from_path(path: &std::path::Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("png") => "image/png".to_string(),
        Some("gif") => "image/gif".to_string(),
        Some("webp") => "image/webp".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

/// Counts preview handles that have not been released yet.
#[derive(Debug, Clone, Default)]
pub struct PreviewTracker {
    live: Arc<AtomicUsize>,
}

impl PreviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn acquire(&self) -> PreviewHandle {
        self.live.fetch_add(1, Ordering::SeqCst);
        PreviewHandle {
            id: format!("preview://{}", Uuid::new_v4()),
            live: Arc::clone(&self.live),
        }
    }
}

/// Transient local reference to a staged photo, released on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    id: String,
    live: Arc<AtomicUsize>,
}

impl PreviewHandle {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        debug!("released {}", self.id);
    }
}

/// A photo chosen for upload but not yet on the server.
#[derive(Debug)]
pub struct StagedPhoto {
    pub upload: PhotoUpload,
    pub preview: PreviewHandle,
}

impl StagedPhoto {
    pub fn file_name(&self) -> &str {
        &self.upload.file_name
    }
}

/// Keep only the staged photos the server reported as failed.
///
/// Failure keys are either `file_<index>` or the file name. When no key
/// matches any staged photo, all of them are kept for the retry.
pub(crate) fn retain_failed<'a>(
    staged: &mut Vec<StagedPhoto>,
    failed_keys: impl IntoIterator<Item = &'a String>,
) {
    let keys: Vec<&String> = failed_keys.into_iter().collect();
    let matches = |i: usize, photo: &StagedPhoto| {
        keys.iter()
            .any(|k| **k == format!("file_{i}") || k.as_str() == photo.file_name())
    };
    if !staged.iter().enumerate().any(|(i, p)| matches(i, p)) {
        return;
    }
    let mut index = 0;
    staged.retain(|photo| {
        let keep = matches(index, photo);
        index += 1;
        keep
    });
}
