//! Decoding of COCO flat coordinate arrays.
//!
//! Polygons arrive as `[x0, y0, x1, y1, ...]` and keypoints as
//! `[x0, y0, v0, x1, y1, v1, ...]`. Both decoders reject arrays whose length
//! does not divide evenly instead of silently truncating the tail.

use crate::error::{CoreError, GeometryKind};
use crate::label::{KeypointPoint, NormalizedPath, NormalizedPoint};

/// COCO visibility flag: joint not labeled.
pub const VIS_UNLABELED: f64 = 0.0;

/// COCO visibility flag: joint labeled but occluded.
pub const VIS_OCCLUDED: f64 = 1.0;

/// COCO visibility flag: joint labeled and visible.
pub const VIS_VISIBLE: f64 = 2.0;

/// Decode one flat polygon array into an ordered point path.
///
/// Point `i` pairs `flat[2i]` with `flat[2i + 1]`.
pub fn decode_polygon(flat: &[f64]) -> Result<NormalizedPath, CoreError> {
    if flat.len() % 2 != 0 {
        return Err(CoreError::MalformedGeometry {
            kind: GeometryKind::Polygon,
            len: flat.len(),
            reason: "coordinate array length must be even".to_string(),
        });
    }

    let points = flat
        .chunks_exact(2)
        .map(|pair| NormalizedPoint {
            x: pair[0],
            y: pair[1],
        })
        .collect();

    Ok(NormalizedPath { points })
}

/// Decode every path of a mask.
pub fn decode_mask(paths: &[Vec<f64>]) -> Result<Vec<NormalizedPath>, CoreError> {
    paths.iter().map(|flat| decode_polygon(flat)).collect()
}

/// Decode COCO keypoint triplets, dropping unlabeled joints.
///
/// Kept joints get `sid = original_index + 1`; the ids are not renumbered,
/// so gaps mark the dropped joints. A visibility flag other than 0, 1 or 2
/// is rejected as malformed geometry.
pub fn decode_keypoint_triplets(flat: &[f64]) -> Result<Vec<KeypointPoint>, CoreError> {
    if flat.len() % 3 != 0 {
        return Err(CoreError::MalformedGeometry {
            kind: GeometryKind::Keypoints,
            len: flat.len(),
            reason: "keypoint array length must be a multiple of 3".to_string(),
        });
    }

    let mut points = Vec::with_capacity(flat.len() / 3);
    for (i, triplet) in flat.chunks_exact(3).enumerate() {
        let v = triplet[2];
        if v == VIS_UNLABELED {
            continue;
        }
        if v != VIS_OCCLUDED && v != VIS_VISIBLE {
            return Err(CoreError::MalformedGeometry {
                kind: GeometryKind::Keypoints,
                len: flat.len(),
                reason: format!("joint {} has visibility flag {v}, expected 0, 1 or 2", i + 1),
            });
        }
        points.push(KeypointPoint {
            x: triplet[0],
            y: triplet[1],
            vis: v == VIS_VISIBLE,
            sid: (i + 1) as u32,
        });
    }

    Ok(points)
}
