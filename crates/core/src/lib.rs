//! Annotation normalization core.
//!
//! Converts COCO-style annotation payloads (boxes, polygon masks, keypoint
//! triplets) for five task modes into the unified label schema consumed by
//! the annotation editor.

pub mod decode;
pub mod error;
pub mod fanout;
pub mod label;
pub mod mapper;
pub mod pipeline;
pub mod raw;
pub mod skeleton;
pub mod task;

pub use error::CoreError;
pub use label::{LabelConfigs, NormalizedImage, UnifiedLabel};
pub use pipeline::{normalize, NormalizedBatch, Normalizer};
pub use raw::RawPayload;
pub use skeleton::{build_configs, SkeletonStructure};
pub use task::TaskMode;
