use anyhow::Result;
use async_trait::async_trait;

use weathereyes_domain::{RawClassification, RawConfidence, WeatherLabel};
use weathereyes_ports::{ClassificationRequest, ClassifierPort};

use crate::keywords::match_keywords;

/// Text-only classifier: scans the description, then the image name, for
/// weather keywords. It never states a confidence, leaving that to the
/// normalizer's policy defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn label_for(&self, request: &ClassificationRequest) -> WeatherLabel {
        let from_description = request.description.as_deref().and_then(match_keywords);
        let from_image = || {
            request
                .image_ref
                .as_deref()
                .map(file_name)
                .and_then(match_keywords)
        };
        from_description
            .or_else(from_image)
            .unwrap_or(WeatherLabel::Unknown)
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[async_trait]
impl ClassifierPort for KeywordClassifier {
    async fn classify(&self, request: &ClassificationRequest) -> Result<RawClassification> {
        let label = self.label_for(request);
        tracing::debug!(source_id = %request.source_id, %label, "keyword classification");
        Ok(RawClassification::new(
            label.as_str(),
            RawConfidence::Missing,
            request.source_id.clone(),
        ))
    }
}
