//! Normalization orchestrator.
//!
//! Drives decode -> map -> fan-out over every image of a fetched payload
//! and builds the label configs once per call. The whole call fails on the
//! first bad annotation; no partial batch is returned.

use serde::Serialize;

use crate::error::CoreError;
use crate::fanout::assign_ids;
use crate::label::{LabelConfigs, NormalizedImage};
use crate::mapper::ToFragments;
use crate::raw::{RawImage, RawPayload};
use crate::skeleton::SkeletonStructure;
use crate::task::TaskMode;

/// Result of one normalization pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedBatch {
    pub images: Vec<NormalizedImage>,
    pub configs: LabelConfigs,
}

impl NormalizedBatch {
    /// Total number of labels across all images.
    pub fn label_count(&self) -> usize {
        self.images.iter().map(|img| img.annotations.len()).sum()
    }
}

/// Normalization settings: the image host prefix to strip and the
/// skeleton advertised for keypoint tasks.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    host_prefix: Option<String>,
    skeleton: SkeletonStructure,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip `prefix` from image URLs that start with it.
    pub fn with_host_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.host_prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    pub fn with_skeleton(mut self, skeleton: SkeletonStructure) -> Self {
        self.skeleton = skeleton;
        self
    }

    pub fn host_prefix(&self) -> Option<&str> {
        self.host_prefix.as_deref()
    }

    pub fn skeleton(&self) -> &SkeletonStructure {
        &self.skeleton
    }

    pub fn build_configs(&self, mode: TaskMode) -> LabelConfigs {
        self.skeleton.configs_for(mode)
    }

    /// Normalize a typed payload.
    pub fn normalize(&self, payload: &RawPayload) -> Result<NormalizedBatch, CoreError> {
        let images = match payload {
            RawPayload::Detection(images) => self.normalize_images(images)?,
            RawPayload::Segmentation(images) => self.normalize_images(images)?,
            RawPayload::Keypoints(images) => self.normalize_images(images)?,
            RawPayload::DetectionSegmentation(images) => self.normalize_images(images)?,
            RawPayload::KeypointsSegmentation(images) => self.normalize_images(images)?,
        };
        let configs = self.build_configs(payload.mode());

        let batch = NormalizedBatch { images, configs };
        tracing::debug!(
            task = %payload.mode(),
            image_count = batch.images.len(),
            label_count = batch.label_count(),
            "Normalized annotation payload",
        );
        Ok(batch)
    }

    /// Parse a raw JSON body for `mode` and normalize it.
    pub fn normalize_json(
        &self,
        mode: TaskMode,
        raw: serde_json::Value,
    ) -> Result<NormalizedBatch, CoreError> {
        let payload = RawPayload::from_json(mode, raw)?;
        self.normalize(&payload)
    }

    fn normalize_images<A: ToFragments>(
        &self,
        images: &[RawImage<A>],
    ) -> Result<Vec<NormalizedImage>, CoreError> {
        images
            .iter()
            .map(|image| {
                let fragments = image
                    .annotations
                    .iter()
                    .map(|anno| anno.to_fragments())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(NormalizedImage {
                    url: self.strip_host_prefix(&image.url).to_string(),
                    annotations: assign_ids(fragments),
                })
            })
            .collect()
    }

    fn strip_host_prefix<'a>(&self, url: &'a str) -> &'a str {
        match &self.host_prefix {
            Some(prefix) => url.strip_prefix(prefix.as_str()).unwrap_or(url),
            None => url,
        }
    }
}

/// Normalize a raw JSON body with default settings.
pub fn normalize(mode: TaskMode, raw: serde_json::Value) -> Result<NormalizedBatch, CoreError> {
    Normalizer::default().normalize_json(mode, raw)
}
