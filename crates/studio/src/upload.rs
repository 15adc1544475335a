use std::path::Path;

use thiserror::Error;

/// Result type for upload operations.
pub type UploadResult<T> = std::result::Result<T, UploadError>;

/// Errors surfaced by the storage upload service.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload rejected: {reason}")]
    Rejected { reason: String },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Receipt returned by the storage service for a stored video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub video_id: String,
}

/// External storage service the shell delegates uploads to.
///
/// The service itself is not owned here; the shell only drives the
/// select-upload-navigate flow against this seam.
pub trait UploadService {
    fn upload(&self, path: &Path) -> UploadResult<UploadReceipt>;
}
