//! REST client for the annotations backend.
//!
//! The backend exposes one route per task mode, `GET {api_url}/{mode}`,
//! answering with a JSON array of images. Errors in the 401..=500 range
//! carry a JSON body whose `detail` field (or the whole body) describes the
//! failure.

use std::time::Duration;

use async_trait::async_trait;
use coco_annotate_core::{CoreError, TaskMode};
use reqwest::header::{HeaderValue, ACCEPT};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Anything that can produce the raw annotation body for a task mode.
///
/// Implemented by [`AnnotationsApi`] for the real backend; the session only
/// depends on this trait.
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    async fn fetch_annotations(&self, mode: TaskMode) -> Result<serde_json::Value, ClientError>;
}

/// HTTP client for the annotations backend.
pub struct AnnotationsApi {
    client: reqwest::Client,
    api_url: String,
}

impl AnnotationsApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:8000/annotations`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// Create an API client with the configured endpoint and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.api_endpoint.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// URL of the route serving `mode`.
    pub fn task_url(&self, mode: TaskMode) -> String {
        format!("{}/{}", self.api_url, mode.as_str())
    }
}

#[async_trait]
impl AnnotationSource for AnnotationsApi {
    /// Fetch the raw annotation body for one task mode.
    async fn fetch_annotations(&self, mode: TaskMode) -> Result<serde_json::Value, ClientError> {
        let url = self.task_url(mode);
        tracing::debug!(task = %mode, url = %url, "Fetching annotations");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        classify_response(status, &body)
    }
}

/// Turn a status code and body text into the parsed payload or an error.
///
/// * 2xx: the body must be JSON; invalid JSON is a payload error.
/// * 401..=500 with a JSON body: [`ClientError::Api`] with the `detail`
///   field, or the whole body when it has none.
/// * anything else: [`ClientError::UnexpectedStatus`].
pub fn classify_response(status: u16, body: &str) -> Result<serde_json::Value, ClientError> {
    if (200..300).contains(&status) {
        let value = serde_json::from_str(body).map_err(CoreError::from)?;
        return Ok(value);
    }

    if (401..=500).contains(&status) {
        if let Ok(mut value) = serde_json::from_str::<serde_json::Value>(body) {
            let has_detail = value.get("detail").is_some_and(|d| !d.is_null());
            let detail = if has_detail {
                value["detail"].take()
            } else {
                value
            };
            return Err(ClientError::Api { status, detail });
        }
    }

    Err(ClientError::UnexpectedStatus {
        status,
        body: body.to_string(),
    })
}
