//! Task selection with a request-generation guard.
//!
//! Each [`AnnotationSession::select_task`] call takes a fresh generation
//! number before fetching. When the fetch and normalization finish, the
//! result is applied only if no newer selection was issued in the meantime,
//! so a slow response for an old task can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use coco_annotate_core::{
    LabelConfigs, NormalizedBatch, NormalizedImage, Normalizer, RawPayload, TaskMode,
};
use tokio::sync::RwLock;

use crate::api::AnnotationSource;
use crate::error::ClientError;

/// The normalized state for the currently selected task.
#[derive(Debug, Clone)]
pub struct LoadedTask {
    pub generation: u64,
    pub task: TaskMode,
    pub images: Vec<NormalizedImage>,
    pub configs: LabelConfigs,
    pub loaded_at: DateTime<Utc>,
}

/// Result of a task selection that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The result replaced the session state.
    Applied { generation: u64, image_count: usize },
    /// A newer selection was issued while this one was in flight; the
    /// result was dropped.
    Stale { generation: u64, latest: u64 },
}

/// Owns the annotation source and the state shown in the editor.
pub struct AnnotationSession<S> {
    source: S,
    normalizer: Normalizer,
    generation: AtomicU64,
    state: RwLock<Option<LoadedTask>>,
}

impl<S: AnnotationSource> AnnotationSession<S> {
    pub fn new(source: S, normalizer: Normalizer) -> Self {
        Self {
            source,
            normalizer,
            generation: AtomicU64::new(0),
            state: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The most recently issued generation (0 before any selection).
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Snapshot of the loaded state, if any task has been applied.
    pub async fn current(&self) -> Option<LoadedTask> {
        self.state.read().await.clone()
    }

    /// Parse `task` and select it.
    pub async fn select_task_str(&self, task: &str) -> Result<SelectOutcome, ClientError> {
        let mode = TaskMode::from_str(task)?;
        self.select_task(mode).await
    }

    /// Fetch, normalize and (if still current) apply the annotations for `mode`.
    ///
    /// On error the previous state is left untouched.
    pub async fn select_task(&self, mode: TaskMode) -> Result<SelectOutcome, ClientError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(task = %mode, generation, "Selecting task");

        let batch = match self.load(mode).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!(task = %mode, generation, error = %e, "Failed to load annotations");
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        let latest = self.latest_generation();
        if generation != latest {
            tracing::warn!(task = %mode, generation, latest, "Discarding stale annotations");
            return Ok(SelectOutcome::Stale { generation, latest });
        }

        let image_count = batch.images.len();
        tracing::info!(
            task = %mode,
            generation,
            image_count,
            label_count = batch.label_count(),
            "Applied annotations",
        );
        *state = Some(LoadedTask {
            generation,
            task: mode,
            images: batch.images,
            configs: batch.configs,
            loaded_at: Utc::now(),
        });

        Ok(SelectOutcome::Applied {
            generation,
            image_count,
        })
    }

    async fn load(&self, mode: TaskMode) -> Result<NormalizedBatch, ClientError> {
        let raw = self.source.fetch_annotations(mode).await?;
        let payload = RawPayload::from_json(mode, raw)?;
        Ok(self.normalizer.normalize(&payload)?)
    }
}
