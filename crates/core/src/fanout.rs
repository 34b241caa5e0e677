//! Flattening of per-annotation fragments into id-assigned labels.

use crate::label::{Fragment, UnifiedLabel};

/// Flatten per-annotation fragment lists and number them `0..n`.
///
/// Order is annotation-major, fragment-minor. Ids depend only on position,
/// so the same input always yields the same ids.
pub fn assign_ids(image_fragments: Vec<Vec<Fragment>>) -> Vec<UnifiedLabel> {
    image_fragments
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(id, shape)| UnifiedLabel { id, shape })
        .collect()
}
