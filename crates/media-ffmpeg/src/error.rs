use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, MediaFfmpegError>;

/// Error type for media probing/capture operations backed by FFmpeg CLI
/// tools.
#[derive(Debug, Error)]
pub enum MediaFfmpegError {
    #[error("invalid timestamp seconds: {0}")]
    InvalidTimestampSeconds(f64),
    #[error("video stream not found: {}", .0.display())]
    MissingVideoStream(PathBuf),
    #[error("video dimensions missing: {}", .0.display())]
    MissingVideoDimensions(PathBuf),
    #[error("media duration missing: {}", .0.display())]
    MissingDuration(PathBuf),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("command failed ({status}): {command}; stderr: {}", stderr.trim())]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("frame capture at {at_seconds}s exceeded its {deadline:?} deadline")]
    CaptureTimedOut { at_seconds: f64, deadline: Duration },
    #[error("utf8 decode error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("parse error ({context}): {value}")]
    Parse {
        context: &'static str,
        value: String,
    },
}
