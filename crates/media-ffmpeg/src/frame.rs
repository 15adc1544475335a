use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{MediaFfmpegError, Result};
use crate::probe::probe_media;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// One JPEG-encoded still at the source's native dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedJpegFrame {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

/// Captures the frame nearest `at_seconds` as a JPEG still.
///
/// The decode process is killed once `deadline` elapses and the call fails
/// with [`MediaFfmpegError::CaptureTimedOut`], so a seek that never completes
/// cannot leave the caller pending forever.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
///
/// use media_ffmpeg::capture_jpeg_frame;
///
/// let frame = capture_jpeg_frame("talk.mp4", 4.0, Duration::from_secs(5))
///     .expect("capture should succeed");
/// assert!(!frame.jpeg.is_empty());
/// ```
pub fn capture_jpeg_frame(
    path: impl AsRef<Path>,
    at_seconds: f64,
    deadline: Duration,
) -> Result<CapturedJpegFrame> {
    if !at_seconds.is_finite() || at_seconds < 0.0 {
        return Err(MediaFfmpegError::InvalidTimestampSeconds(at_seconds));
    }

    let path = path.as_ref();
    let media = probe_media(path)?;
    let video = media.video()?;

    let mut child = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-v")
        .arg("error")
        .arg("-ss")
        .arg(format!("{at_seconds:.6}"))
        .arg("-i")
        .arg(path)
        .arg("-frames:v")
        .arg("1")
        .arg("-f")
        .arg("image2pipe")
        .arg("-c:v")
        .arg("mjpeg")
        .arg("-")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| MediaFfmpegError::Io {
            context: "spawn ffmpeg frame capture",
            source,
        })?;

    // Pipes must be drained while waiting or a large frame stalls ffmpeg.
    let stdout_reader = spawn_pipe_reader(child.stdout.take());
    let stderr_reader = spawn_pipe_reader(child.stderr.take());

    let status = match wait_with_deadline(&mut child, deadline)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = join_pipe_reader(stdout_reader);
            let _ = join_pipe_reader(stderr_reader);
            return Err(MediaFfmpegError::CaptureTimedOut {
                at_seconds,
                deadline,
            });
        }
    };

    let stdout = join_pipe_reader(stdout_reader);
    let stderr = join_pipe_reader(stderr_reader);

    if !status.success() {
        return Err(MediaFfmpegError::CommandFailed {
            command: format!("ffmpeg frame capture {}", path.display()),
            status,
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        });
    }
    if !looks_like_jpeg(&stdout) {
        return Err(MediaFfmpegError::Parse {
            context: "captured frame",
            value: format!("expected JPEG data, got {} bytes", stdout.len()),
        });
    }

    Ok(CapturedJpegFrame {
        width: video.width,
        height: video.height,
        jpeg: stdout,
    })
}

fn wait_with_deadline(child: &mut Child, deadline: Duration) -> Result<Option<ExitStatus>> {
    let started = Instant::now();
    loop {
        let exited = child.try_wait().map_err(|source| MediaFfmpegError::Io {
            context: "wait for ffmpeg frame capture",
            source,
        })?;
        if let Some(status) = exited {
            return Ok(Some(status));
        }
        if started.elapsed() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_pipe_reader<R>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = reader.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn join_pipe_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn looks_like_jpeg(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0xff && bytes[1] == 0xd8
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{capture_jpeg_frame, looks_like_jpeg};
    use crate::error::MediaFfmpegError;

    #[test]
    fn negative_timestamp_is_rejected_before_probing() {
        let result = capture_jpeg_frame("missing.mp4", -1.0, Duration::from_secs(1));
        assert!(matches!(
            result,
            Err(MediaFfmpegError::InvalidTimestampSeconds(at)) if at == -1.0
        ));
    }

    #[test]
    fn non_finite_timestamp_is_rejected() {
        let result = capture_jpeg_frame("missing.mp4", f64::NAN, Duration::from_secs(1));
        assert!(matches!(
            result,
            Err(MediaFfmpegError::InvalidTimestampSeconds(_))
        ));
    }

    #[test]
    fn jpeg_detection_checks_the_soi_marker() {
        assert!(looks_like_jpeg(&[0xff, 0xd8, 0xff, 0xe0]));
        assert!(!looks_like_jpeg(&[0x00, 0x01, 0x02]));
        assert!(!looks_like_jpeg(&[0xff, 0xd8]));
        assert!(!looks_like_jpeg(&[]));
    }
}
