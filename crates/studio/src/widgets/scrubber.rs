use editor::{EditorSnapshot, Ticks};

/// Rect-like representation of one clip for drawing the scrubber track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipStrip {
    pub clip_id: u64,
    pub x: f32,
    pub width: f32,
}

/// Values needed by the UI to draw the scrubber track and playhead.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubberRenderModel {
    pub clips: Vec<ClipStrip>,
    pub playhead_x: f32,
}

/// Interaction result emitted by the scrubber widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubberInteraction {
    Scrubbed(Ticks),
    SplitRequested,
}

/// Builds draw data for the scrubber widget.
pub fn build_render_model(
    snapshot: &EditorSnapshot,
    playhead_tl: Ticks,
    width_px: f32,
) -> ScrubberRenderModel {
    let safe_width = width_px.max(0.0);
    let duration_tl = snapshot.duration_tl.max(1);
    let scale = safe_width / duration_tl as f32;

    let clips = snapshot
        .clips
        .iter()
        .map(|clip| ClipStrip {
            clip_id: clip.id,
            x: clip.start_tl as f32 * scale,
            width: (clip.end_tl - clip.start_tl).max(0) as f32 * scale,
        })
        .collect();

    let clamped_playhead = playhead_tl.clamp(0, duration_tl);
    ScrubberRenderModel {
        clips,
        playhead_x: clamped_playhead as f32 * scale,
    }
}

/// Maps a pointer X position into timeline ticks for scrubbing.
///
/// The full range is addressable, end position included, so the playhead
/// can rest on the final frame boundary.
pub fn scrub_at_x(x_px: f32, width_px: f32, duration_tl: Ticks) -> Ticks {
    if duration_tl <= 0 {
        return 0;
    }
    if width_px <= 0.0 {
        return 0;
    }

    let normalized = (x_px / width_px).clamp(0.0, 1.0);
    (normalized as f64 * duration_tl as f64).round() as Ticks
}

/// Creates a scrub interaction from a click on the scrubber track.
pub fn click_at_x(x_px: f32, width_px: f32, duration_tl: Ticks) -> ScrubberInteraction {
    ScrubberInteraction::Scrubbed(scrub_at_x(x_px, width_px, duration_tl))
}

/// Creates a scrub interaction from a drag update on the scrubber track.
pub fn drag_to_x(x_px: f32, width_px: f32, duration_tl: Ticks) -> ScrubberInteraction {
    ScrubberInteraction::Scrubbed(scrub_at_x(x_px, width_px, duration_tl))
}

/// Creates a split interaction (for the split button or keyboard shortcut).
pub fn request_split() -> ScrubberInteraction {
    ScrubberInteraction::SplitRequested
}

#[cfg(test)]
mod tests {
    use editor::{ClipSummary, EditorSnapshot, SourceSummary};
    use std::path::PathBuf;

    use super::{
        ScrubberInteraction, build_render_model, click_at_x, drag_to_x, request_split, scrub_at_x,
    };

    fn sample_snapshot() -> EditorSnapshot {
        EditorSnapshot {
            source: SourceSummary {
                path: PathBuf::from("talk.mp4"),
                width: 1280,
                height: 720,
                has_audio: true,
            },
            clips: vec![
                ClipSummary {
                    id: 1,
                    start_tl: 0,
                    end_tl: 600,
                    thumbnail: None,
                },
                ClipSummary {
                    id: 2,
                    start_tl: 600,
                    end_tl: 1_000,
                    thumbnail: None,
                },
            ],
            duration_tl: 1_000,
        }
    }

    #[test]
    fn build_render_model_positions_clips_and_playhead() {
        let snapshot = sample_snapshot();
        let model = build_render_model(&snapshot, 250, 100.0);

        assert_eq!(model.clips.len(), 2);
        assert_eq!(model.clips[0].x, 0.0);
        assert_eq!(model.clips[0].width, 60.0);
        assert_eq!(model.clips[1].x, 60.0);
        assert_eq!(model.clips[1].width, 40.0);
        assert_eq!(model.playhead_x, 25.0);
    }

    #[test]
    fn playhead_at_duration_maps_to_track_edge() {
        let snapshot = sample_snapshot();
        let model = build_render_model(&snapshot, 1_000, 100.0);
        assert_eq!(model.playhead_x, 100.0);
    }

    #[test]
    fn scrub_position_is_clamped_and_scaled() {
        assert_eq!(scrub_at_x(-10.0, 200.0, 1_000), 0);
        assert_eq!(scrub_at_x(100.0, 200.0, 1_000), 500);
        assert_eq!(scrub_at_x(220.0, 200.0, 1_000), 1_000);
    }

    #[test]
    fn click_and_drag_emit_scrub_interactions() {
        assert_eq!(
            click_at_x(50.0, 200.0, 1_000),
            ScrubberInteraction::Scrubbed(250)
        );
        assert_eq!(
            drag_to_x(75.0, 100.0, 400),
            ScrubberInteraction::Scrubbed(300)
        );
    }

    #[test]
    fn split_request_emits_split_interaction() {
        assert_eq!(request_split(), ScrubberInteraction::SplitRequested);
    }
}
