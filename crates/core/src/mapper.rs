//! Per-mode mapping of raw annotation records into label fragments.
//!
//! Combined modes emit their fragments in a fixed order: `box, mask` for
//! `detection+segmentation` and `mask, keypoints` for
//! `keypoints+segmentation`.

use crate::decode::{decode_keypoint_triplets, decode_mask};
use crate::error::CoreError;
use crate::label::{BoxShape, Fragment, KeypointsShape, MaskShape};
use crate::raw::{
    BoxAnnotation, BoxMaskAnnotation, KeypointsAnnotation, MaskAnnotation, PoseMaskAnnotation,
    PERSON_CATEGORY,
};

/// Turns one raw annotation record into zero or more id-less fragments.
pub trait ToFragments {
    fn to_fragments(&self) -> Result<Vec<Fragment>, CoreError>;
}

fn box_fragment(category: &str, x: f64, y: f64, w: f64, h: f64) -> Fragment {
    Fragment::Box(BoxShape {
        category: category.to_string(),
        x,
        y,
        w,
        h,
    })
}

fn mask_fragment(category: &str, mask: &[Vec<f64>]) -> Result<Fragment, CoreError> {
    Ok(Fragment::Mask(MaskShape {
        category: category.to_string(),
        paths: decode_mask(mask)?,
    }))
}

/// `None` when every joint was unlabeled.
fn keypoints_fragment(category: &str, flat: &[f64]) -> Result<Option<Fragment>, CoreError> {
    let keypoints = decode_keypoint_triplets(flat)?;
    if keypoints.is_empty() {
        return Ok(None);
    }
    Ok(Some(Fragment::Keypoints(KeypointsShape {
        category: category.to_string(),
        keypoints,
    })))
}

impl ToFragments for BoxAnnotation {
    fn to_fragments(&self) -> Result<Vec<Fragment>, CoreError> {
        Ok(vec![box_fragment(
            &self.category,
            self.x,
            self.y,
            self.w,
            self.h,
        )])
    }
}

impl ToFragments for MaskAnnotation {
    fn to_fragments(&self) -> Result<Vec<Fragment>, CoreError> {
        Ok(vec![mask_fragment(&self.category, &self.mask)?])
    }
}

impl ToFragments for KeypointsAnnotation {
    fn to_fragments(&self) -> Result<Vec<Fragment>, CoreError> {
        Ok(keypoints_fragment(&self.category, &self.keypoints)?
            .into_iter()
            .collect())
    }
}

impl ToFragments for BoxMaskAnnotation {
    fn to_fragments(&self) -> Result<Vec<Fragment>, CoreError> {
        Ok(vec![
            box_fragment(&self.category, self.x, self.y, self.w, self.h),
            mask_fragment(&self.category, &self.mask)?,
        ])
    }
}

impl ToFragments for PoseMaskAnnotation {
    fn to_fragments(&self) -> Result<Vec<Fragment>, CoreError> {
        let mut fragments = vec![mask_fragment(PERSON_CATEGORY, &self.mask)?];
        fragments.extend(keypoints_fragment(PERSON_CATEGORY, &self.keypoints)?);
        Ok(fragments)
    }
}
