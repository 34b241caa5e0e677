//! Task modes offered by the annotations backend.
//!
//! Each mode selects both the backend route (`GET {endpoint}/{mode}`) and
//! the shape of the annotation records it returns.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the five annotation task modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskMode {
    #[serde(rename = "detection")]
    Detection,
    #[serde(rename = "segmentation")]
    Segmentation,
    #[serde(rename = "keypoints")]
    Keypoints,
    #[serde(rename = "detection+segmentation")]
    DetectionSegmentation,
    #[serde(rename = "keypoints+segmentation")]
    KeypointsSegmentation,
}

/// All valid task mode strings, in menu order.
pub(crate) const VALID_MODE_STRINGS: &[&str] = &[
    "detection",
    "segmentation",
    "keypoints",
    "detection+segmentation",
    "keypoints+segmentation",
];

impl TaskMode {
    /// Every mode, in the order the task menu lists them.
    pub const ALL: [TaskMode; 5] = [
        Self::Detection,
        Self::Segmentation,
        Self::Keypoints,
        Self::DetectionSegmentation,
        Self::KeypointsSegmentation,
    ];

    /// Return the canonical mode string, which doubles as the URL path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detection => "detection",
            Self::Segmentation => "segmentation",
            Self::Keypoints => "keypoints",
            Self::DetectionSegmentation => "detection+segmentation",
            Self::KeypointsSegmentation => "keypoints+segmentation",
        }
    }

    /// Parse a mode from its exact canonical string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "detection" => Ok(Self::Detection),
            "segmentation" => Ok(Self::Segmentation),
            "keypoints" => Ok(Self::Keypoints),
            "detection+segmentation" => Ok(Self::DetectionSegmentation),
            "keypoints+segmentation" => Ok(Self::KeypointsSegmentation),
            _ => Err(CoreError::UnsupportedTaskMode(s.to_string())),
        }
    }

    /// Whether this mode carries keypoint annotations.
    pub fn has_keypoints(&self) -> bool {
        self.as_str().contains("keypoints")
    }
}

impl std::fmt::Display for TaskMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn every_mode_parses_its_own_string() {
        for mode in TaskMode::ALL {
            assert_eq!(TaskMode::from_str(mode.as_str()).unwrap(), mode);
        }
    }

    #[test]
    fn combined_mode_string_keeps_plus_sign() {
        assert_eq!(
            TaskMode::DetectionSegmentation.as_str(),
            "detection+segmentation"
        );
    }

    #[test]
    fn unknown_mode_rejected() {
        let err = TaskMode::from_str("panoptic").unwrap_err();
        assert!(err.to_string().contains("Must be one of: detection, segmentation"));
        assert_matches!(err, CoreError::UnsupportedTaskMode(ref s) if s == "panoptic");
    }

    #[test]
    fn empty_and_case_variants_rejected() {
        assert!(TaskMode::from_str("").is_err());
        assert!(TaskMode::from_str("Detection").is_err());
        assert!(TaskMode::from_str("segmentation+detection").is_err());
    }

    #[test]
    fn keypoint_modes_flagged() {
        assert!(TaskMode::Keypoints.has_keypoints());
        assert!(TaskMode::KeypointsSegmentation.has_keypoints());
        assert!(!TaskMode::Detection.has_keypoints());
        assert!(!TaskMode::Segmentation.has_keypoints());
        assert!(!TaskMode::DetectionSegmentation.has_keypoints());
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&TaskMode::KeypointsSegmentation).unwrap();
        assert_eq!(json, "\"keypoints+segmentation\"");
        let mode: TaskMode = serde_json::from_str("\"detection\"").unwrap();
        assert_eq!(mode, TaskMode::Detection);
    }
}
