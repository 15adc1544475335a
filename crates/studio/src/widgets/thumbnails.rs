use editor::{EditorSnapshot, Thumbnail, Ticks, seconds_from_ticks};

/// One clip tile in the thumbnail rail below the scrubber.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipTile {
    pub clip_id: u64,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub label: String,
    pub image: Option<Thumbnail>,
}

/// Builds one tile per clip, in timeline order.
///
/// A clip without a captured thumbnail renders as a placeholder tile; only
/// clips created by a split carry an image.
pub fn build_clip_tiles(snapshot: &EditorSnapshot) -> Vec<ClipTile> {
    snapshot
        .clips
        .iter()
        .map(|clip| ClipTile {
            clip_id: clip.id,
            start_seconds: seconds_from_ticks(clip.start_tl),
            end_seconds: seconds_from_ticks(clip.end_tl),
            label: format_range(clip.start_tl, clip.end_tl),
            image: clip.thumbnail.clone(),
        })
        .collect()
}

/// Formats a clip range as `m:ss.t - m:ss.t` for the tile caption.
pub fn format_range(start_tl: Ticks, end_tl: Ticks) -> String {
    format!(
        "{} - {}",
        format_timestamp(start_tl),
        format_timestamp(end_tl)
    )
}

/// Formats a tick position as minutes, seconds, and tenths.
pub fn format_timestamp(t_tl: Ticks) -> String {
    let tenths = (seconds_from_ticks(t_tl.max(0)) * 10.0).round() as i64;
    let minutes = tenths / 600;
    let seconds = (tenths % 600) / 10;
    let fraction = tenths % 10;
    format!("{minutes}:{seconds:02}.{fraction}")
}
