//! Editor callback hooks.
//!
//! The annotation editor reports user actions (save, category edits,
//! errors) through an [`EditorSink`]. The sink receives data as-is; no
//! normalization happens on this path.

use async_trait::async_trait;
use coco_annotate_core::NormalizedImage;

use crate::error::SinkError;

/// Receiver for the editor's callback hooks.
#[async_trait]
pub trait EditorSink: Send + Sync {
    /// Persist an edited image.
    async fn on_save(&self, image: &NormalizedImage) -> Result<(), SinkError>;

    /// Report an editor-side error with free-form context.
    async fn on_error(&self, message: &str, context: &serde_json::Value);

    /// Register a new category.
    async fn on_add_category(&self, category: &str) -> Result<(), SinkError>;

    /// Rename a category, optionally scoped to one label type.
    async fn on_rename_category(
        &self,
        old: &str,
        new: &str,
        label_type: Option<&str>,
    ) -> Result<(), SinkError>;
}

/// Sink that logs every hook through `tracing` and accepts it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl EditorSink for TracingSink {
    async fn on_save(&self, image: &NormalizedImage) -> Result<(), SinkError> {
        tracing::info!(
            url = %image.url,
            label_count = image.annotations.len(),
            "Editor saved image",
        );
        Ok(())
    }

    async fn on_error(&self, message: &str, context: &serde_json::Value) {
        tracing::error!(error = %message, context = %context, "Editor reported error");
    }

    async fn on_add_category(&self, category: &str) -> Result<(), SinkError> {
        if category.trim().is_empty() {
            return Err(SinkError::Rejected("category name must not be empty".to_string()));
        }
        tracing::info!(category = %category, "Editor added category");
        Ok(())
    }

    async fn on_rename_category(
        &self,
        old: &str,
        new: &str,
        label_type: Option<&str>,
    ) -> Result<(), SinkError> {
        if new.trim().is_empty() {
            return Err(SinkError::Rejected("category name must not be empty".to_string()));
        }
        tracing::info!(old = %old, new = %new, label_type = ?label_type, "Editor renamed category");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tracing_sink_accepts_saves() {
        let image = NormalizedImage {
            url: "/img/1.jpg".to_string(),
            annotations: vec![],
        };
        assert!(TracingSink.on_save(&image).await.is_ok());
    }

    #[tokio::test]
    async fn tracing_sink_rejects_blank_categories() {
        assert!(TracingSink.on_add_category("cat").await.is_ok());
        assert_eq!(
            TracingSink.on_add_category("  ").await,
            Err(SinkError::Rejected("category name must not be empty".to_string()))
        );
        assert!(TracingSink
            .on_rename_category("cat", "kitten", Some("box"))
            .await
            .is_ok());
        assert!(TracingSink.on_rename_category("cat", "", None).await.is_err());
    }
}
