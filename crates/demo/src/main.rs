//! `coco-annotate-demo` -- drives the annotation session against a backend.
//!
//! Loads each configured task mode in turn, the way the editor's task menu
//! would, and prints the final normalized state as JSON on stdout.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default   | Description                          |
//! |------------------------|----------|-----------|--------------------------------------|
//! | `API_ENDPOINT`         | yes      | --        | Backend base URL                     |
//! | `IMAGE_HOST_PREFIX`    | no       | unset     | Prefix stripped from image URLs      |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`      | Per-request timeout                  |
//! | `TASKS`                | no       | all modes | Comma-separated task modes to load   |

use coco_annotate_client::{
    AnnotationSession, AnnotationsApi, ClientConfig, ClientError, EditorSink, SelectOutcome,
    TracingSink,
};
use coco_annotate_core::Normalizer;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coco_annotate_demo=info,coco_annotate_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let api = AnnotationsApi::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    let mut normalizer = Normalizer::new();
    if let Some(prefix) = &config.image_host_prefix {
        normalizer = normalizer.with_host_prefix(prefix.clone());
    }

    tracing::info!(
        api_url = %api.api_url(),
        tasks = config.tasks.len(),
        "Starting coco-annotate-demo",
    );

    let session = AnnotationSession::new(api, normalizer);
    let sink = TracingSink;

    for mode in &config.tasks {
        match session.select_task(*mode).await {
            Ok(SelectOutcome::Applied { image_count, .. }) => {
                tracing::info!(task = %mode, image_count, "Task loaded");
            }
            Ok(SelectOutcome::Stale { .. }) => {}
            Err(e) => report_failure(&sink, &e).await,
        }
    }

    let Some(loaded) = session.current().await else {
        tracing::warn!("No task could be loaded");
        std::process::exit(1);
    };

    let output = json!({
        "task": loaded.task,
        "generation": loaded.generation,
        "loadedAt": loaded.loaded_at.to_rfc3339(),
        "images": loaded.images,
        "configs": loaded.configs,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize normalized state"),
    }
}

/// Route a selection failure to the sink's error hook.
async fn report_failure(sink: &impl EditorSink, error: &ClientError) {
    let context = match error {
        ClientError::Api { status, detail } => json!({ "status": status, "detail": detail }),
        ClientError::UnexpectedStatus { status, .. } => json!({ "status": status }),
        ClientError::Network(_) | ClientError::Core(_) => json!(null),
    };
    sink.on_error(&error.to_string(), &context).await;
}
