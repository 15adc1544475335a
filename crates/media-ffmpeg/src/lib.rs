mod error;
mod frame;
mod probe;

pub use error::{MediaFfmpegError, Result};
pub use frame::{CapturedJpegFrame, capture_jpeg_frame};
pub use probe::{MediaInfo, StreamInfo, StreamKind, VideoDimensions, probe_media};
