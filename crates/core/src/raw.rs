//! Strictly typed records for the payloads the backend returns.
//!
//! The backend answers `GET {endpoint}/{mode}` with a JSON array of images
//! whose annotation records differ per mode. [`RawPayload`] holds one
//! variant per mode so each record is parsed into its own struct up front.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::task::TaskMode;

/// Category assigned to pose annotations, which are person-only.
pub const PERSON_CATEGORY: &str = "person";

fn default_person() -> String {
    PERSON_CATEGORY.to_string()
}

/// One source image together with its raw annotation records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawImage<A> {
    pub url: String,
    #[serde(default = "Vec::new")]
    pub annotations: Vec<A>,
}

/// `detection`: a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxAnnotation {
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// `segmentation`: a polygon mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskAnnotation {
    pub category: String,
    pub mask: Vec<Vec<f64>>,
}

/// `keypoints`: COCO keypoint triplets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointsAnnotation {
    #[serde(default = "default_person")]
    pub category: String,
    pub keypoints: Vec<f64>,
}

/// `detection+segmentation`: a box and a mask sharing one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxMaskAnnotation {
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub mask: Vec<Vec<f64>>,
}

/// `keypoints+segmentation`: a person mask plus pose keypoints.
///
/// Any category sent by the backend is ignored; the labels are always
/// [`PERSON_CATEGORY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseMaskAnnotation {
    pub mask: Vec<Vec<f64>>,
    pub keypoints: Vec<f64>,
}

/// A fetched payload, parsed according to the task mode it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Detection(Vec<RawImage<BoxAnnotation>>),
    Segmentation(Vec<RawImage<MaskAnnotation>>),
    Keypoints(Vec<RawImage<KeypointsAnnotation>>),
    DetectionSegmentation(Vec<RawImage<BoxMaskAnnotation>>),
    KeypointsSegmentation(Vec<RawImage<PoseMaskAnnotation>>),
}

impl RawPayload {
    /// Parse a response body into the variant for `mode`.
    ///
    /// Missing or mistyped fields fail with [`CoreError::Payload`]; unknown
    /// extra fields are ignored.
    pub fn from_json(mode: TaskMode, value: serde_json::Value) -> Result<Self, CoreError> {
        let payload = match mode {
            TaskMode::Detection => Self::Detection(serde_json::from_value(value)?),
            TaskMode::Segmentation => Self::Segmentation(serde_json::from_value(value)?),
            TaskMode::Keypoints => Self::Keypoints(serde_json::from_value(value)?),
            TaskMode::DetectionSegmentation => {
                Self::DetectionSegmentation(serde_json::from_value(value)?)
            }
            TaskMode::KeypointsSegmentation => {
                Self::KeypointsSegmentation(serde_json::from_value(value)?)
            }
        };
        Ok(payload)
    }

    /// The task mode this payload was parsed for.
    pub fn mode(&self) -> TaskMode {
        match self {
            Self::Detection(_) => TaskMode::Detection,
            Self::Segmentation(_) => TaskMode::Segmentation,
            Self::Keypoints(_) => TaskMode::Keypoints,
            Self::DetectionSegmentation(_) => TaskMode::DetectionSegmentation,
            Self::KeypointsSegmentation(_) => TaskMode::KeypointsSegmentation,
        }
    }

    /// Number of images in the payload.
    pub fn image_count(&self) -> usize {
        match self {
            Self::Detection(images) => images.len(),
            Self::Segmentation(images) => images.len(),
            Self::Keypoints(images) => images.len(),
            Self::DetectionSegmentation(images) => images.len(),
            Self::KeypointsSegmentation(images) => images.len(),
        }
    }
}
