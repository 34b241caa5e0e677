//! Unified label schema understood by the annotation editor.
//!
//! Every task mode is normalized into the same three label shapes. A
//! [`Fragment`] is a label that has not been assigned an id yet; the
//! fan-out step turns fragments into [`UnifiedLabel`]s.

use serde::{Deserialize, Serialize};

/// A single 2-D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

/// One decoded polygon path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPath {
    pub points: Vec<NormalizedPoint>,
}

/// A labeled joint.
///
/// `sid` is the 1-based index of the joint in the source triplet array, so
/// it stays a stable joint identity even when earlier joints were dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointPoint {
    pub x: f64,
    pub y: f64,
    pub vis: bool,
    pub sid: u32,
}

/// Axis-aligned box: top-left corner plus width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Polygon mask made of one or more paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskShape {
    pub category: String,
    pub paths: Vec<NormalizedPath>,
}

/// Set of labeled joints belonging to one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointsShape {
    pub category: String,
    pub keypoints: Vec<KeypointPoint>,
}

/// A label without an id, produced by mapping one raw annotation.
///
/// Serialized with the `"type"` discriminant the editor expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fragment {
    Box(BoxShape),
    Mask(MaskShape),
    Keypoints(KeypointsShape),
}

impl Fragment {
    /// The discriminant string written to the `"type"` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box(_) => "box",
            Self::Mask(_) => "mask",
            Self::Keypoints(_) => "keypoints",
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Self::Box(b) => &b.category,
            Self::Mask(m) => &m.category,
            Self::Keypoints(k) => &k.category,
        }
    }
}

/// A fragment with its per-image id attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedLabel {
    pub id: usize,
    #[serde(flatten)]
    pub shape: Fragment,
}

/// An image with its normalized labels, ready for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedImage {
    pub url: String,
    pub annotations: Vec<UnifiedLabel>,
}

/// Skeleton configuration for keypoint labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointsConfig {
    pub structure: Vec<[u32; 2]>,
}

/// Auxiliary configuration handed to the editor alongside the images.
///
/// Serializes to `{}` when no keypoint task is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelConfigs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypoints: Option<KeypointsConfig>,
}

impl LabelConfigs {
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_none()
    }
}
