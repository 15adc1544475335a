use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::Result;
use crate::save::EditPlan;
use crate::time::Ticks;

/// One encoded JPEG still captured at a split point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub bytes: Arc<[u8]>,
}

impl Thumbnail {
    /// Wraps encoded image bytes in a shareable thumbnail.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes: bytes.into(),
        }
    }
}

/// Result of probing one source video for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedSource {
    pub path: PathBuf,
    pub duration_tl: Ticks,
    pub width: u32,
    pub height: u32,
    pub has_audio: bool,
}

/// Media operations required by the editor.
///
/// Concurrent calls are never issued: the editor serializes capture and
/// commit through its activity guard. Implementations must bound every wait
/// with the supplied deadline and surface expiry as a typed error instead of
/// pending forever.
pub trait MediaBackend {
    /// Probes duration, dimensions, and audio presence for loading.
    fn probe(&self, path: &Path) -> Result<ProbedSource>;

    /// Seeks to `at_seconds`, renders the frame at native dimensions, and
    /// encodes it as one JPEG still.
    fn capture_thumbnail(
        &self,
        path: &Path,
        at_seconds: f64,
        deadline: Duration,
    ) -> Result<Thumbnail>;

    /// Hands the edit plan to the processing service.
    fn commit_edit(&self, plan: &EditPlan, deadline: Duration) -> Result<()>;
}

/// FFmpeg CLI-backed backend used by production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegMediaBackend;

impl MediaBackend for FfmpegMediaBackend {
    fn probe(&self, path: &Path) -> Result<ProbedSource> {
        let info = media_ffmpeg::probe_media(path)?;
        let video = info.video()?;

        Ok(ProbedSource {
            path: info.path.clone(),
            duration_tl: crate::time::ticks_from_seconds(info.duration_seconds),
            width: video.width,
            height: video.height,
            has_audio: info.has_audio(),
        })
    }

    fn capture_thumbnail(
        &self,
        path: &Path,
        at_seconds: f64,
        deadline: Duration,
    ) -> Result<Thumbnail> {
        let frame = media_ffmpeg::capture_jpeg_frame(path, at_seconds, deadline)?;
        debug!(
            at_seconds,
            width = frame.width,
            height = frame.height,
            jpeg_len = frame.jpeg.len(),
            "thumbnail captured"
        );
        Ok(Thumbnail::new(frame.width, frame.height, frame.jpeg))
    }

    fn commit_edit(&self, plan: &EditPlan, _deadline: Duration) -> Result<()> {
        // Stand-in for the processing service: the plan is logged, never
        // persisted.
        let payload = serde_json::to_string(plan).unwrap_or_else(|_| "<unserializable>".into());
        info!(
            source = %plan.source.display(),
            clip_count = plan.clips.len(),
            payload,
            "edit plan handed off"
        );
        Ok(())
    }
}
