use crate::time::Ticks;

/// Playback state for the loaded source, decoupled from any rendering
/// surface.
///
/// An explicit value object updated by discrete notifications so the clip
/// state machine can be driven without a media backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSession {
    pub position_tl: Ticks,
    pub duration_tl: Ticks,
    pub playing: bool,
    pub muted: bool,
}

impl PlaybackSession {
    /// Creates a paused, unmuted session at position 0.
    pub fn new(duration_tl: Ticks) -> Self {
        Self {
            position_tl: 0,
            duration_tl: duration_tl.max(0),
            playing: false,
            muted: false,
        }
    }

    /// Moves the playhead, clamped to `[0, duration]`, and returns the
    /// applied position.
    pub fn seek(&mut self, t_tl: Ticks) -> Ticks {
        self.position_tl = t_tl.clamp(0, self.duration_tl);
        self.position_tl
    }

    /// Flips the playing flag and returns the new value.
    pub fn toggle_playback(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Flips the muted flag and returns the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}
