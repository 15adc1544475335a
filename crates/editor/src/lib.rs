//! UI-agnostic clip trimming core for the studio shell.

pub mod api;
pub mod clip;
pub mod error;
pub mod save;
pub mod session;
pub mod thumbnail;
pub mod time;

pub use api::{
    Activity, ClipSummary, Command, Editor, EditorErrorEvent, EditorErrorKind, EditorSnapshot,
    Event, SourceSummary,
};
pub use clip::{Clip, ClipId, ClipList};
pub use error::{EditorError, Result};
pub use save::{EditPlan, PlannedClip};
pub use session::PlaybackSession;
pub use thumbnail::{FfmpegMediaBackend, MediaBackend, ProbedSource, Thumbnail};
pub use time::{TICKS_PER_SECOND, Ticks, seconds_from_ticks, ticks_from_seconds};
