use tracing::{debug, warn};

use crate::error::{EditorError, Result};
use crate::thumbnail::Thumbnail;
use crate::time::Ticks;

/// Stable identifier assigned to a clip at creation or split time.
pub type ClipId = u64;

/// One contiguous sub-range of the loaded source video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub id: ClipId,
    pub start_tl: Ticks,
    pub end_tl: Ticks,
    /// Present only on clips produced by a split; both halves of a split
    /// share one captured frame.
    pub thumbnail: Option<Thumbnail>,
}

impl Clip {
    /// Returns true when `t_tl` falls inside this clip, inclusive at both
    /// endpoints.
    pub fn contains(&self, t_tl: Ticks) -> bool {
        self.start_tl <= t_tl && t_tl <= self.end_tl
    }
}

/// Ordered clip sequence tiling `[0, duration]` with no gaps or overlaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipList {
    pub clips: Vec<Clip>,
}

impl ClipList {
    /// Seeds the list with a single clip spanning the full source duration.
    ///
    /// # Example
    /// ```
    /// use editor::clip::ClipList;
    ///
    /// let clips = ClipList::spanning(1, 10_000_000).unwrap();
    /// assert_eq!(clips.clips.len(), 1);
    /// assert_eq!(clips.duration_tl(), 10_000_000);
    /// ```
    pub fn spanning(clip_id: ClipId, duration_tl: Ticks) -> Result<Self> {
        if duration_tl <= 0 {
            return Err(EditorError::InvalidDuration { duration_tl });
        }

        Ok(Self {
            clips: vec![Clip {
                id: clip_id,
                start_tl: 0,
                end_tl: duration_tl,
                thumbnail: None,
            }],
        })
    }

    /// Returns total tiled duration in ticks.
    pub fn duration_tl(&self) -> Ticks {
        self.clips.last().map(|clip| clip.end_tl).unwrap_or(0)
    }

    /// Finds the index of the clip containing `t_tl`.
    ///
    /// Endpoints are inclusive; a timestamp on a shared boundary resolves to
    /// the first clip in sequence order.
    pub fn find_clip_index(&self, t_tl: Ticks) -> Option<usize> {
        self.clips.iter().position(|clip| clip.contains(t_tl))
    }

    /// Returns the clip containing `t_tl`, if any.
    pub fn clip_at(&self, t_tl: Ticks) -> Option<&Clip> {
        self.find_clip_index(t_tl).map(|index| &self.clips[index])
    }

    /// Splits the clip containing `at_tl` into two halves meeting at `at_tl`.
    ///
    /// The left half keeps the existing clip id; the right half receives
    /// `right_id`. Both halves carry `thumbnail`, sharing one captured frame.
    /// Splits landing exactly on a clip endpoint are rejected so zero-length
    /// clips never enter the list.
    ///
    /// # Example
    /// ```
    /// use editor::clip::ClipList;
    /// use editor::thumbnail::Thumbnail;
    ///
    /// let mut clips = ClipList::spanning(1, 10_000_000).unwrap();
    /// clips
    ///     .split_clip(4_000_000, 2, Thumbnail::new(2, 2, vec![0xff, 0xd8]))
    ///     .unwrap();
    /// assert_eq!(clips.clips.len(), 2);
    /// assert_eq!(clips.clips[0].end_tl, clips.clips[1].start_tl);
    /// ```
    pub fn split_clip(&mut self, at_tl: Ticks, right_id: ClipId, thumbnail: Thumbnail) -> Result<()> {
        let Some(index) = self.find_clip_index(at_tl) else {
            warn!(at_tl, "split rejected: no containing clip");
            return Err(EditorError::ClipNotFound { at_tl });
        };
        let current = &self.clips[index];
        if at_tl == current.start_tl || at_tl == current.end_tl {
            warn!(at_tl, clip_id = current.id, "split rejected: boundary point");
            return Err(EditorError::SplitPointAtBoundary { at_tl });
        }

        let left = Clip {
            end_tl: at_tl,
            thumbnail: Some(thumbnail.clone()),
            ..current.clone()
        };
        let right = Clip {
            id: right_id,
            start_tl: at_tl,
            end_tl: current.end_tl,
            thumbnail: Some(thumbnail),
        };

        debug!(
            at_tl,
            clip_id = left.id,
            right_id,
            left_span = at_tl - left.start_tl,
            right_span = right.end_tl - at_tl,
            "split accepted"
        );

        self.clips[index] = left;
        self.clips.insert(index + 1, right);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::ClipList;
    use crate::error::EditorError;
    use crate::thumbnail::Thumbnail;

    fn thumb(value: u8) -> Thumbnail {
        Thumbnail::new(4, 4, vec![value; 16])
    }

    fn assert_tiles_exactly(clips: &ClipList, duration_tl: i64) {
        assert_eq!(clips.clips.first().map(|clip| clip.start_tl), Some(0));
        assert_eq!(clips.duration_tl(), duration_tl);
        for pair in clips.clips.windows(2) {
            assert_eq!(pair[0].end_tl, pair[1].start_tl);
        }
        assert!(clips.clips.iter().all(|clip| clip.start_tl < clip.end_tl));
    }

    #[test]
    fn spanning_yields_exactly_one_full_span_clip() {
        let clips = ClipList::spanning(1, 10_000_000).expect("valid duration");

        assert_eq!(clips.clips.len(), 1);
        assert_eq!(clips.clips[0].start_tl, 0);
        assert_eq!(clips.clips[0].end_tl, 10_000_000);
        assert!(clips.clips[0].thumbnail.is_none());
    }

    #[test]
    fn spanning_rejects_non_positive_duration() {
        assert!(matches!(
            ClipList::spanning(1, 0),
            Err(EditorError::InvalidDuration { duration_tl: 0 })
        ));
    }

    #[test]
    fn split_replaces_one_clip_with_two_meeting_at_the_split_point() {
        let mut clips = ClipList::spanning(1, 10_000_000).expect("valid duration");

        clips
            .split_clip(4_000_000, 2, thumb(1))
            .expect("split should succeed");

        assert_eq!(clips.clips.len(), 2);
        assert_eq!(clips.clips[0].id, 1);
        assert_eq!(clips.clips[1].id, 2);
        assert_eq!(clips.clips[0].end_tl, 4_000_000);
        assert_eq!(clips.clips[1].start_tl, 4_000_000);
        assert_tiles_exactly(&clips, 10_000_000);
    }

    #[test]
    fn both_halves_share_the_captured_thumbnail_allocation() {
        let mut clips = ClipList::spanning(1, 10_000_000).expect("valid duration");

        clips
            .split_clip(4_000_000, 2, thumb(7))
            .expect("split should succeed");

        let left = clips.clips[0].thumbnail.as_ref().expect("left thumbnail");
        let right = clips.clips[1].thumbnail.as_ref().expect("right thumbnail");
        assert!(Arc::ptr_eq(&left.bytes, &right.bytes));
    }

    #[test]
    fn second_split_only_affects_the_targeted_clip() {
        let mut clips = ClipList::spanning(1, 10_000_000).expect("valid duration");
        clips
            .split_clip(4_000_000, 2, thumb(1))
            .expect("first split should succeed");

        clips
            .split_clip(7_000_000, 3, thumb(2))
            .expect("second split should succeed");

        assert_eq!(clips.clips.len(), 3);
        assert_eq!(clips.clips[0].end_tl, 4_000_000);
        assert_eq!(clips.clips[1].end_tl, 7_000_000);
        assert_eq!(clips.clips[2].end_tl, 10_000_000);
        assert_eq!(
            clips.clips[0].thumbnail.as_ref().map(|t| t.bytes[0]),
            Some(1)
        );
        assert_eq!(
            clips.clips[1].thumbnail.as_ref().map(|t| t.bytes[0]),
            Some(2)
        );
        assert_eq!(
            clips.clips[2].thumbnail.as_ref().map(|t| t.bytes[0]),
            Some(2)
        );
        assert_tiles_exactly(&clips, 10_000_000);
    }

    #[test]
    fn split_outside_the_tiled_range_leaves_the_list_unchanged() {
        let mut clips = ClipList::spanning(1, 10_000_000).expect("valid duration");
        let before = clips.clone();

        let result = clips.split_clip(15_000_000, 2, thumb(1));

        assert!(matches!(
            result,
            Err(EditorError::ClipNotFound {
                at_tl: 15_000_000
            })
        ));
        assert_eq!(clips, before);
    }

    #[test]
    fn splits_at_clip_endpoints_are_rejected() {
        let mut clips = ClipList::spanning(1, 10_000_000).expect("valid duration");
        clips
            .split_clip(4_000_000, 2, thumb(1))
            .expect("split should succeed");
        let before = clips.clone();

        for at_tl in [0, 4_000_000, 10_000_000] {
            let result = clips.split_clip(at_tl, 9, thumb(2));
            assert!(
                matches!(result, Err(EditorError::SplitPointAtBoundary { .. })),
                "split at {at_tl} should be rejected"
            );
        }
        assert_eq!(clips, before);
    }

    #[test]
    fn lookup_is_idempotent_and_resolves_shared_boundaries_to_the_first_clip() {
        let mut clips = ClipList::spanning(1, 10_000_000).expect("valid duration");
        clips
            .split_clip(4_000_000, 2, thumb(1))
            .expect("split should succeed");

        assert_eq!(clips.find_clip_index(4_000_000), Some(0));
        assert_eq!(clips.find_clip_index(4_000_000), Some(0));
        assert_eq!(clips.find_clip_index(4_000_001), Some(1));
        assert_eq!(clips.clip_at(2_000_000).map(|clip| clip.id), Some(1));
        assert_eq!(clips.clip_at(11_000_000), None);
    }
}
