//! Annotations backend client.
//!
//! Fetches per-task annotation payloads over HTTP, normalizes them with
//! `coco-annotate-core`, and keeps the latest result behind a
//! request-generation guard. Editor callbacks go through [`EditorSink`].

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod sink;

pub use api::{AnnotationSource, AnnotationsApi};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, SinkError};
pub use session::{AnnotationSession, LoadedTask, SelectOutcome};
pub use sink::{EditorSink, TracingSink};
