use std::path::PathBuf;

use thiserror::Error;

use crate::api::Activity;
use crate::time::Ticks;

/// Result type used by the editor crate.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors produced by editor commands and clip-list operations.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no source video is loaded")]
    SourceNotLoaded,
    #[error("unsupported container: {} (expected .mp4 or .webm)", path.display())]
    UnsupportedContainer { path: PathBuf },
    #[error("source duration must be positive, probed {duration_tl} ticks")]
    InvalidDuration { duration_tl: Ticks },
    #[error("no clip contains timeline timestamp {at_tl}")]
    ClipNotFound { at_tl: Ticks },
    #[error("cannot split at clip boundary: {at_tl}")]
    SplitPointAtBoundary { at_tl: Ticks },
    #[error("{current} is already in progress")]
    OperationInProgress { current: Activity },
    #[error("media backend error: {0}")]
    Media(#[from] media_ffmpeg::MediaFfmpegError),
}
