use coco_annotate_core::CoreError;

/// Errors from fetching and normalizing one task's annotations.
///
/// Every variant aborts the in-flight task selection; the previously loaded
/// state is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a status that carries no usable error body.
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend rejected the request with a structured JSON error.
    #[error("Annotations API error ({status}): {detail}")]
    Api {
        status: u16,
        /// The body's `detail` field, or the whole body when it has none.
        detail: serde_json::Value,
    },

    /// Decoding or normalizing the payload failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Errors reported by an editor sink when it refuses an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("Rejected by editor sink: {0}")]
    Rejected(String),
}
