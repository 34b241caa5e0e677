//! Skeleton structure for keypoint rendering.
//!
//! The editor draws a connector for every joint pair in the structure.
//! Joint ids are 1-based, the same numbering as [`KeypointPoint::sid`].
//!
//! [`KeypointPoint::sid`]: crate::label::KeypointPoint::sid

use crate::label::{KeypointsConfig, LabelConfigs};
use crate::task::TaskMode;

/// The 19-edge COCO person-pose skeleton over 17 joints.
pub const COCO_PERSON_SKELETON: [[u32; 2]; 19] = [
    [16, 14],
    [14, 12],
    [17, 15],
    [15, 13],
    [12, 13],
    [6, 12],
    [7, 13],
    [6, 7],
    [6, 8],
    [7, 9],
    [8, 10],
    [9, 11],
    [2, 3],
    [1, 2],
    [1, 3],
    [2, 4],
    [3, 5],
    [4, 6],
    [5, 7],
];

/// Joint connectivity table handed to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonStructure {
    edges: Vec<[u32; 2]>,
}

impl SkeletonStructure {
    pub fn new(edges: Vec<[u32; 2]>) -> Self {
        Self { edges }
    }

    /// The COCO person skeleton.
    pub fn coco_person() -> Self {
        Self::new(COCO_PERSON_SKELETON.to_vec())
    }

    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Highest joint id referenced by any edge, or 0 for an empty table.
    pub fn max_joint(&self) -> u32 {
        self.edges.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Whether `sid` falls inside the table's joint domain `1..=max_joint`.
    pub fn covers(&self, sid: u32) -> bool {
        sid >= 1 && sid <= self.max_joint()
    }

    /// Build the label configs for `mode`. Depends only on the mode, never
    /// on annotation data.
    pub fn configs_for(&self, mode: TaskMode) -> LabelConfigs {
        if !mode.has_keypoints() {
            return LabelConfigs::default();
        }
        LabelConfigs {
            keypoints: Some(KeypointsConfig {
                structure: self.edges.clone(),
            }),
        }
    }
}

impl Default for SkeletonStructure {
    fn default() -> Self {
        Self::coco_person()
    }
}

/// Label configs for `mode` using the COCO person skeleton.
pub fn build_configs(mode: TaskMode) -> LabelConfigs {
    SkeletonStructure::coco_person().configs_for(mode)
}
