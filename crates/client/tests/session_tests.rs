//! Integration tests for [`AnnotationSession`].
//!
//! Uses an in-memory [`AnnotationSource`] so selection ordering, stale
//! result handling, and error isolation can be checked without a backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use coco_annotate_client::{AnnotationSession, AnnotationSource, ClientError, SelectOutcome};
use coco_annotate_core::{CoreError, Normalizer, TaskMode};

// ---------------------------------------------------------------------------
// Test source
// ---------------------------------------------------------------------------

enum Reply {
    Body(Value),
    Api(u16, Value),
}

#[derive(Default)]
struct FakeSource {
    replies: HashMap<TaskMode, Reply>,
    /// Fetches for this mode wait until the notify fires.
    gate: Option<(TaskMode, Arc<Notify>)>,
    calls: AtomicUsize,
}

impl FakeSource {
    fn reply(mut self, mode: TaskMode, reply: Reply) -> Self {
        self.replies.insert(mode, reply);
        self
    }

    fn gated(mut self, mode: TaskMode, notify: Arc<Notify>) -> Self {
        self.gate = Some((mode, notify));
        self
    }
}

#[async_trait]
impl AnnotationSource for FakeSource {
    async fn fetch_annotations(&self, mode: TaskMode) -> Result<Value, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((gated, notify)) = &self.gate {
            if *gated == mode {
                notify.notified().await;
            }
        }
        match self.replies.get(&mode) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Api(status, detail)) => Err(ClientError::Api {
                status: *status,
                detail: detail.clone(),
            }),
            None => Err(ClientError::UnexpectedStatus {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

fn boxes() -> Value {
    json!([{"url": "http://img.host/1.jpg", "annotations": [
        {"category": "cat", "x": 1, "y": 2, "w": 3, "h": 4}
    ]}])
}

fn masks() -> Value {
    json!([
        {"url": "http://img.host/1.jpg", "annotations": [{"category": "cat", "mask": [[0, 0, 1, 1]]}]},
        {"url": "http://img.host/2.jpg", "annotations": []}
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn applied_selection_replaces_state() {
    let source = FakeSource::default().reply(TaskMode::Detection, Reply::Body(boxes()));
    let session = AnnotationSession::new(source, Normalizer::new().with_host_prefix("http://img.host"));

    let outcome = session.select_task(TaskMode::Detection).await.unwrap();
    assert_eq!(
        outcome,
        SelectOutcome::Applied {
            generation: 1,
            image_count: 1
        }
    );

    let loaded = session.current().await.unwrap();
    assert_eq!(loaded.task, TaskMode::Detection);
    assert_eq!(loaded.generation, 1);
    assert_eq!(loaded.images[0].url, "/1.jpg");
    assert!(loaded.configs.is_empty());
}

#[tokio::test]
async fn next_selection_fully_replaces_previous() {
    let source = FakeSource::default()
        .reply(TaskMode::Detection, Reply::Body(boxes()))
        .reply(TaskMode::Segmentation, Reply::Body(masks()));
    let session = AnnotationSession::new(source, Normalizer::new());

    session.select_task(TaskMode::Detection).await.unwrap();
    session.select_task(TaskMode::Segmentation).await.unwrap();

    let loaded = session.current().await.unwrap();
    assert_eq!(loaded.task, TaskMode::Segmentation);
    assert_eq!(loaded.images.len(), 2);
    assert_eq!(loaded.images[0].annotations[0].shape.kind(), "mask");
}

#[tokio::test]
async fn stale_result_is_discarded() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource::default()
        .reply(TaskMode::Detection, Reply::Body(boxes()))
        .reply(TaskMode::Segmentation, Reply::Body(masks()))
        .gated(TaskMode::Detection, gate.clone());
    let session = Arc::new(AnnotationSession::new(source, Normalizer::new()));

    let slow = {
        let session = session.clone();
        tokio::spawn(async move { session.select_task(TaskMode::Detection).await })
    };
    while session.latest_generation() < 1 {
        tokio::task::yield_now().await;
    }

    let fast = session.select_task(TaskMode::Segmentation).await.unwrap();
    assert_matches!(fast, SelectOutcome::Applied { generation: 2, .. });

    gate.notify_one();
    let slow = slow.await.unwrap().unwrap();
    assert_eq!(
        slow,
        SelectOutcome::Stale {
            generation: 1,
            latest: 2
        }
    );

    let loaded = session.current().await.unwrap();
    assert_eq!(loaded.task, TaskMode::Segmentation);
    assert_eq!(loaded.generation, 2);
}

#[tokio::test]
async fn api_error_leaves_state_untouched() {
    let source = FakeSource::default()
        .reply(TaskMode::Detection, Reply::Body(boxes()))
        .reply(TaskMode::Keypoints, Reply::Api(401, json!("not authenticated")));
    let session = AnnotationSession::new(source, Normalizer::new());

    session.select_task(TaskMode::Detection).await.unwrap();
    let err = session.select_task(TaskMode::Keypoints).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 401, .. });

    let loaded = session.current().await.unwrap();
    assert_eq!(loaded.task, TaskMode::Detection);
    assert_eq!(session.latest_generation(), 2);
}

#[tokio::test]
async fn malformed_geometry_leaves_state_untouched() {
    let bad = json!([{"url": "1.jpg", "annotations": [{"category": "cat", "mask": [[0, 0, 1]]}]}]);
    let source = FakeSource::default()
        .reply(TaskMode::Detection, Reply::Body(boxes()))
        .reply(TaskMode::Segmentation, Reply::Body(bad));
    let session = AnnotationSession::new(source, Normalizer::new());

    session.select_task(TaskMode::Detection).await.unwrap();
    let err = session.select_task(TaskMode::Segmentation).await.unwrap_err();
    assert_matches!(err, ClientError::Core(CoreError::MalformedGeometry { .. }));
    assert_eq!(session.current().await.unwrap().task, TaskMode::Detection);
}

#[tokio::test]
async fn unsupported_task_string_never_fetches() {
    let session = AnnotationSession::new(FakeSource::default(), Normalizer::new());

    let err = session.select_task_str("tracking").await.unwrap_err();
    assert_matches!(err, ClientError::Core(CoreError::UnsupportedTaskMode(_)));
    assert_eq!(session.source().calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.latest_generation(), 0);
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn keypoint_task_carries_skeleton_configs() {
    let body = json!([{"url": "p.jpg", "annotations": [
        {"mask": [[0, 0, 4, 0, 4, 4]], "keypoints": [1, 1, 2, 0, 0, 0]}
    ]}]);
    let source = FakeSource::default().reply(TaskMode::KeypointsSegmentation, Reply::Body(body));
    let session = AnnotationSession::new(source, Normalizer::new());

    session.select_task_str("keypoints+segmentation").await.unwrap();
    let loaded = session.current().await.unwrap();
    assert_eq!(loaded.configs.keypoints.unwrap().structure.len(), 19);
    assert_eq!(loaded.images[0].annotations.len(), 2);
}
