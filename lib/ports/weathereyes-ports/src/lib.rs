//! Seams to the collaborators that live outside the decision engine.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use weathereyes_domain::{NotificationChannel, RawClassification, RenderedMessage};

/// One item to be classified: an uploaded image, a social post, etc.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassificationRequest {
    #[serde(alias = "id")]
    pub source_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "image_url")]
    pub image_ref: Option<String>,
}

impl ClassificationRequest {
    pub fn with_description(source_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            description: Some(description.into()),
            image_ref: None,
        }
    }
}

/// Produces a single-item weather guess. Implementations own their timeout
/// and retry policy.
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    async fn classify(&self, request: &ClassificationRequest) -> Result<RawClassification>;

    async fn classify_batch(
        &self,
        requests: &[ClassificationRequest],
    ) -> Result<Vec<RawClassification>> {
        let mut out = Vec::with_capacity(requests.len());
        for request in requests {
            out.push(self.classify(request).await?);
        }
        Ok(out)
    }
}

/// Delivers rendered alerts to people.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn send_notification(&self, message: &RenderedMessage) -> Result<()>;
    async fn configure_channel(&self, channel: NotificationChannel) -> Result<()>;
}
