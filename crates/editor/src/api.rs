use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::clip::{ClipId, ClipList};
use crate::error::{EditorError, Result};
use crate::save::build_edit_plan;
use crate::session::PlaybackSession;
use crate::thumbnail::{FfmpegMediaBackend, MediaBackend, ProbedSource, Thumbnail};
use crate::time::{Ticks, seconds_from_ticks};

/// Default bound on one thumbnail capture (seek + decode + encode).
const CAPTURE_DEADLINE: Duration = Duration::from_secs(5);
/// Default bound on the edit-plan hand-off.
const COMMIT_DEADLINE: Duration = Duration::from_secs(10);

/// Containers accepted by the file picker.
const SUPPORTED_CONTAINERS: [&str; 2] = ["mp4", "webm"];

/// Commands accepted by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Loads a source video, discarding any previous source and clips.
    Load { path: PathBuf },
    /// Moves the playhead to `t_tl` in timeline ticks.
    Scrub { t_tl: Ticks },
    TogglePlayback,
    ToggleMute,
    /// Splits the clip containing `at_tl`, capturing one thumbnail at the
    /// split point for both halves.
    ///
    /// # Example
    /// ```no_run
    /// use std::path::PathBuf;
    /// use editor::{Command, Editor, FfmpegMediaBackend};
    ///
    /// let mut editor = Editor::new(FfmpegMediaBackend);
    /// let _ = editor.handle_command(Command::Load {
    ///     path: PathBuf::from("talk.mp4"),
    /// });
    /// let _ = editor.handle_command(Command::Split { at_tl: 4_000_000 });
    /// ```
    Split { at_tl: Ticks },
    /// Hands the current clip sequence to the processing service.
    Save,
}

/// Events emitted by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SourceChanged(EditorSnapshot),
    PositionChanged { t_tl: Ticks },
    PlaybackChanged { playing: bool },
    MuteChanged { muted: bool },
    ClipsChanged(EditorSnapshot),
    SaveCompleted { clip_count: usize },
    Error(EditorErrorEvent),
}

/// Coarse error classes surfaced to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorErrorKind {
    SplitPointAtBoundary,
    ClipNotFound,
    OperationInProgress,
    CaptureTimedOut,
    UnsupportedContainer,
    Other,
}

impl From<&EditorError> for EditorErrorKind {
    fn from(value: &EditorError) -> Self {
        match value {
            EditorError::SplitPointAtBoundary { .. } => Self::SplitPointAtBoundary,
            EditorError::ClipNotFound { .. } => Self::ClipNotFound,
            EditorError::OperationInProgress { .. } => Self::OperationInProgress,
            EditorError::UnsupportedContainer { .. } => Self::UnsupportedContainer,
            EditorError::Media(media_ffmpeg::MediaFfmpegError::CaptureTimedOut { .. }) => {
                Self::CaptureTimedOut
            }
            _ => Self::Other,
        }
    }
}

/// User-facing error payload emitted as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorErrorEvent {
    pub kind: EditorErrorKind,
    pub message: String,
}

impl EditorErrorEvent {
    pub fn from_error(error: &EditorError) -> Self {
        Self {
            kind: EditorErrorKind::from(error),
            message: error.to_string(),
        }
    }
}

/// Mutual-exclusion state for split and save.
///
/// The shell additionally disables its controls while an operation is in
/// flight, but the guard enforced here is what actually rejects a second
/// request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Activity {
    #[default]
    Idle,
    Splitting,
    Saving,
}

impl Display for Activity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "no operation",
            Self::Splitting => "a split",
            Self::Saving => "a save",
        };
        write!(f, "{label}")
    }
}

/// Immutable editor snapshot consumed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub source: SourceSummary,
    pub clips: Vec<ClipSummary>,
    pub duration_tl: Ticks,
}

/// Snapshot representation of the loaded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub has_audio: bool,
}

/// Snapshot representation of one clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSummary {
    pub id: ClipId,
    pub start_tl: Ticks,
    pub end_tl: Ticks,
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug)]
struct LoadedSource {
    source: ProbedSource,
    clips: ClipList,
    session: PlaybackSession,
}

/// Editor implementation for load/scrub/split/save commands.
#[derive(Debug)]
pub struct Editor<M> {
    media: M,
    loaded: Option<LoadedSource>,
    next_clip_id: ClipId,
    activity: Activity,
    capture_deadline: Duration,
    commit_deadline: Duration,
}

impl<M> Editor<M>
where
    M: MediaBackend,
{
    /// Creates a new editor with the provided media backend.
    ///
    /// # Example
    /// ```no_run
    /// use editor::{Editor, FfmpegMediaBackend};
    ///
    /// let _editor = Editor::new(FfmpegMediaBackend);
    /// ```
    pub fn new(media: M) -> Self {
        Self {
            media,
            loaded: None,
            next_clip_id: 1,
            activity: Activity::Idle,
            capture_deadline: CAPTURE_DEADLINE,
            commit_deadline: COMMIT_DEADLINE,
        }
    }

    /// Applies one command and returns emitted events.
    pub fn handle_command(&mut self, command: Command) -> Result<Vec<Event>> {
        match command {
            Command::Load { path } => self.load(path),
            Command::Scrub { t_tl } => self.scrub(t_tl),
            Command::TogglePlayback => self.toggle_playback(),
            Command::ToggleMute => self.toggle_mute(),
            Command::Split { at_tl } => self.split(at_tl),
            Command::Save => self.save(),
        }
    }

    /// Returns the current mutual-exclusion state.
    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Returns the playback session for the loaded source, if any.
    pub fn session(&self) -> Option<PlaybackSession> {
        self.loaded.as_ref().map(|loaded| loaded.session)
    }

    /// Returns a snapshot of the loaded source and its clips, if any.
    pub fn snapshot(&self) -> Option<EditorSnapshot> {
        self.loaded.as_ref().map(snapshot_of)
    }

    fn load(&mut self, path: PathBuf) -> Result<Vec<Event>> {
        ensure_supported_container(&path)?;
        let probed = self.media.probe(&path)?;
        if probed.duration_tl <= 0 {
            return Err(EditorError::InvalidDuration {
                duration_tl: probed.duration_tl,
            });
        }

        let clip_id = self.allocate_clip_id();
        let clips = ClipList::spanning(clip_id, probed.duration_tl)?;
        let session = PlaybackSession::new(probed.duration_tl);

        info!(
            path = %probed.path.display(),
            duration_tl = probed.duration_tl,
            width = probed.width,
            height = probed.height,
            has_audio = probed.has_audio,
            "source loaded"
        );

        // Previous source, clips, and session are discarded wholesale.
        self.loaded = Some(LoadedSource {
            source: probed,
            clips,
            session,
        });
        self.activity = Activity::Idle;

        let snapshot = self.snapshot().ok_or(EditorError::SourceNotLoaded)?;
        Ok(vec![
            Event::SourceChanged(snapshot),
            Event::PositionChanged { t_tl: 0 },
        ])
    }

    fn scrub(&mut self, t_tl: Ticks) -> Result<Vec<Event>> {
        let loaded = self.loaded.as_mut().ok_or(EditorError::SourceNotLoaded)?;
        let applied = loaded.session.seek(t_tl);
        debug!(requested = t_tl, applied, "playhead moved");
        Ok(vec![Event::PositionChanged { t_tl: applied }])
    }

    fn toggle_playback(&mut self) -> Result<Vec<Event>> {
        let loaded = self.loaded.as_mut().ok_or(EditorError::SourceNotLoaded)?;
        let playing = loaded.session.toggle_playback();
        Ok(vec![Event::PlaybackChanged { playing }])
    }

    fn toggle_mute(&mut self) -> Result<Vec<Event>> {
        let loaded = self.loaded.as_mut().ok_or(EditorError::SourceNotLoaded)?;
        let muted = loaded.session.toggle_mute();
        Ok(vec![Event::MuteChanged { muted }])
    }

    fn split(&mut self, at_tl: Ticks) -> Result<Vec<Event>> {
        self.begin(Activity::Splitting)?;
        let result = self.split_guarded(at_tl);
        self.activity = Activity::Idle;
        result
    }

    fn split_guarded(&mut self, at_tl: Ticks) -> Result<Vec<Event>> {
        let right_id = self.next_clip_id;

        // Preconditions are checked before the capture so a miss never costs
        // a decode.
        let (path, at_seconds) = {
            let loaded = self.loaded.as_ref().ok_or(EditorError::SourceNotLoaded)?;
            let index = loaded
                .clips
                .find_clip_index(at_tl)
                .ok_or(EditorError::ClipNotFound { at_tl })?;
            let clip = &loaded.clips.clips[index];
            if at_tl == clip.start_tl || at_tl == clip.end_tl {
                return Err(EditorError::SplitPointAtBoundary { at_tl });
            }
            (loaded.source.path.clone(), seconds_from_ticks(at_tl))
        };

        // The capture must complete before the list mutates.
        let thumbnail = self
            .media
            .capture_thumbnail(&path, at_seconds, self.capture_deadline)?;

        let loaded = self.loaded.as_mut().ok_or(EditorError::SourceNotLoaded)?;
        loaded.clips.split_clip(at_tl, right_id, thumbnail)?;
        let allocated_clip_id = self.allocate_clip_id();
        debug_assert_eq!(
            allocated_clip_id, right_id,
            "allocated clip id diverged from the split request id"
        );

        let loaded = self.loaded.as_ref().ok_or(EditorError::SourceNotLoaded)?;
        info!(
            at_tl,
            right_id,
            clip_count = loaded.clips.clips.len(),
            "split applied"
        );
        Ok(vec![Event::ClipsChanged(snapshot_of(loaded))])
    }

    fn save(&mut self) -> Result<Vec<Event>> {
        self.begin(Activity::Saving)?;
        let result = self.save_guarded();
        self.activity = Activity::Idle;
        result
    }

    fn save_guarded(&mut self) -> Result<Vec<Event>> {
        let loaded = self.loaded.as_ref().ok_or(EditorError::SourceNotLoaded)?;
        let plan = build_edit_plan(loaded.source.path.clone(), &loaded.clips);
        let clip_count = plan.clips.len();

        self.media.commit_edit(&plan, self.commit_deadline)?;

        info!(
            source = %plan.source.display(),
            clip_count,
            "save completed"
        );
        Ok(vec![Event::SaveCompleted { clip_count }])
    }

    fn begin(&mut self, next: Activity) -> Result<()> {
        if self.activity != Activity::Idle {
            return Err(EditorError::OperationInProgress {
                current: self.activity,
            });
        }
        self.activity = next;
        Ok(())
    }

    fn allocate_clip_id(&mut self) -> ClipId {
        let id = self.next_clip_id;
        self.next_clip_id += 1;
        id
    }
}

impl Editor<FfmpegMediaBackend> {
    /// Creates an editor wired to the FFmpeg backend.
    pub fn with_ffmpeg() -> Self {
        Self::new(FfmpegMediaBackend)
    }
}

fn snapshot_of(loaded: &LoadedSource) -> EditorSnapshot {
    EditorSnapshot {
        source: SourceSummary {
            path: loaded.source.path.clone(),
            width: loaded.source.width,
            height: loaded.source.height,
            has_audio: loaded.source.has_audio,
        },
        clips: loaded
            .clips
            .clips
            .iter()
            .map(|clip| ClipSummary {
                id: clip.id,
                start_tl: clip.start_tl,
                end_tl: clip.end_tl,
                thumbnail: clip.thumbnail.clone(),
            })
            .collect(),
        duration_tl: loaded.clips.duration_tl(),
    }
}

fn ensure_supported_container(path: &Path) -> Result<()> {
    let supported = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            SUPPORTED_CONTAINERS
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false);

    if supported {
        Ok(())
    } else {
        Err(EditorError::UnsupportedContainer {
            path: path.to_path_buf(),
        })
    }
}
