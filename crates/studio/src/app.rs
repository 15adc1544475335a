use std::path::PathBuf;

use editor::{Command, EditorSnapshot, Event, Ticks};
use tracing::{error, info};

use crate::upload::UploadService;

/// Top-level studio tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudioTab {
    #[default]
    Content,
    Analytics,
    Settings,
}

/// UI message consumed by update.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TabSelected(StudioTab),
    /// File-picker result; `None` when the picker was dismissed.
    UploadRequested(Option<PathBuf>),
    FileOpened(PathBuf),
    ScrubberMoved(Ticks),
    PlayPauseToggled,
    MuteToggled,
    SplitRequested,
    SaveRequested,
    Editor(Event),
}

/// Side effect requested by update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Editor command to push through the bridge.
    Forward(Command),
    /// Blocking user-facing alert.
    Alert(String),
    Navigate(StudioTab),
}

/// Shell state for the studio screen.
#[derive(Debug)]
pub struct StudioState<U> {
    uploader: U,
    tab: StudioTab,
    uploading: bool,
    progress: u8,
    processing: bool,
    playing: bool,
    muted: bool,
    snapshot: Option<EditorSnapshot>,
    playhead_tl: Ticks,
}

impl<U> StudioState<U>
where
    U: UploadService,
{
    /// Creates the shell on the content tab with no source loaded.
    pub fn new(uploader: U) -> Self {
        Self {
            uploader,
            tab: StudioTab::default(),
            uploading: false,
            progress: 0,
            processing: false,
            playing: false,
            muted: false,
            snapshot: None,
            playhead_tl: 0,
        }
    }

    /// Applies one UI message and returns requested side effects.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::TabSelected(tab) => {
                self.tab = tab;
                Vec::new()
            }
            Message::UploadRequested(None) => Vec::new(),
            Message::UploadRequested(Some(path)) => self.upload(path),
            Message::FileOpened(path) => vec![Effect::Forward(Command::Load { path })],
            Message::ScrubberMoved(t_tl) => {
                self.playhead_tl = t_tl.max(0);
                vec![Effect::Forward(Command::Scrub {
                    t_tl: self.playhead_tl,
                })]
            }
            Message::PlayPauseToggled => vec![Effect::Forward(Command::TogglePlayback)],
            Message::MuteToggled => vec![Effect::Forward(Command::ToggleMute)],
            Message::SplitRequested => {
                if self.processing {
                    return Vec::new();
                }
                self.processing = true;
                vec![Effect::Forward(Command::Split {
                    at_tl: self.playhead_tl,
                })]
            }
            Message::SaveRequested => {
                if self.processing {
                    return Vec::new();
                }
                self.processing = true;
                vec![Effect::Forward(Command::Save)]
            }
            Message::Editor(event) => self.apply_editor_event(event),
        }
    }

    /// Returns the active tab.
    pub fn tab(&self) -> StudioTab {
        self.tab
    }

    /// Returns true while a file is handed to the storage service.
    pub fn uploading(&self) -> bool {
        self.uploading
    }

    /// Upload progress in percent.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns true while a split or save is in flight.
    pub fn processing(&self) -> bool {
        self.processing
    }

    /// Returns true when editor controls should accept input.
    pub fn controls_enabled(&self) -> bool {
        !self.processing && !self.uploading
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Returns the latest editor snapshot, if a source is loaded.
    pub fn snapshot(&self) -> Option<&EditorSnapshot> {
        self.snapshot.as_ref()
    }

    /// Returns the shell-side playhead position.
    pub fn playhead_tl(&self) -> Ticks {
        self.playhead_tl
    }

    fn upload(&mut self, path: PathBuf) -> Vec<Effect> {
        if self.uploading {
            return Vec::new();
        }
        self.uploading = true;
        self.progress = 0;

        let result = self.uploader.upload(&path);

        // Cleared before the result is inspected so no outcome can leave the
        // flag stuck.
        self.uploading = false;

        match result {
            Ok(receipt) => {
                self.progress = 100;
                info!(
                    path = %path.display(),
                    video_id = %receipt.video_id,
                    "upload accepted"
                );
                vec![Effect::Navigate(StudioTab::Content)]
            }
            Err(upload_error) => {
                error!(path = %path.display(), %upload_error, "upload failed");
                vec![Effect::Alert(format!("Upload failed: {upload_error}"))]
            }
        }
    }

    fn apply_editor_event(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SourceChanged(snapshot) => {
                self.snapshot = Some(snapshot);
                self.playhead_tl = 0;
                Vec::new()
            }
            Event::PositionChanged { t_tl } => {
                self.playhead_tl = t_tl;
                Vec::new()
            }
            Event::PlaybackChanged { playing } => {
                self.playing = playing;
                Vec::new()
            }
            Event::MuteChanged { muted } => {
                self.muted = muted;
                Vec::new()
            }
            Event::ClipsChanged(snapshot) => {
                self.snapshot = Some(snapshot);
                self.processing = false;
                Vec::new()
            }
            Event::SaveCompleted { .. } => {
                self.processing = false;
                Vec::new()
            }
            Event::Error(error_event) => {
                self.processing = false;
                vec![Effect::Alert(error_event.message)]
            }
        }
    }
}
