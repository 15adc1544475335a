use std::path::PathBuf;

use serde::Serialize;

use crate::clip::{ClipId, ClipList};
use crate::time::seconds_from_ticks;

/// Edit plan handed to the processing service on save.
///
/// The editor owns no persistence; this is the full payload a transcoding
/// backend would need — the source reference plus the ordered clip sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditPlan {
    pub source: PathBuf,
    pub clips: Vec<PlannedClip>,
}

/// One clip range of the plan, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedClip {
    pub clip_id: ClipId,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

/// Builds the save payload from the current clip sequence.
pub fn build_edit_plan(source: PathBuf, clips: &ClipList) -> EditPlan {
    EditPlan {
        source,
        clips: clips
            .clips
            .iter()
            .map(|clip| PlannedClip {
                clip_id: clip.id,
                start_seconds: seconds_from_ticks(clip.start_tl),
                end_seconds: seconds_from_ticks(clip.end_tl),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::build_edit_plan;
    use crate::clip::ClipList;
    use crate::thumbnail::Thumbnail;

    #[test]
    fn plan_lists_the_full_clip_sequence_in_timeline_order() {
        let mut clips = ClipList::spanning(1, 10_000_000).expect("valid duration");
        clips
            .split_clip(4_000_000, 2, Thumbnail::new(1, 1, vec![0]))
            .expect("split should succeed");

        let plan = build_edit_plan(PathBuf::from("talk.mp4"), &clips);

        assert_eq!(plan.source, PathBuf::from("talk.mp4"));
        assert_eq!(plan.clips.len(), 2);
        assert_eq!(plan.clips[0].clip_id, 1);
        assert_eq!(plan.clips[0].start_seconds, 0.0);
        assert_eq!(plan.clips[0].end_seconds, 4.0);
        assert_eq!(plan.clips[1].clip_id, 2);
        assert_eq!(plan.clips[1].start_seconds, 4.0);
        assert_eq!(plan.clips[1].end_seconds, 10.0);
    }

    #[test]
    fn plan_serializes_to_json() {
        let clips = ClipList::spanning(1, 2_000_000).expect("valid duration");
        let plan = build_edit_plan(PathBuf::from("talk.mp4"), &clips);

        let payload = serde_json::to_string(&plan).expect("plan should serialize");
        assert!(payload.contains("\"clip_id\":1"));
        assert!(payload.contains("talk.mp4"));
    }
}
