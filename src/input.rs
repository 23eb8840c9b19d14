use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use weathereyes_application::classify_all;
use weathereyes_domain::RawClassification;
use weathereyes_ports::{ClassificationRequest, ClassifierPort};

/// One entry of a batch file: either an already classified item or a raw
/// item that still needs a classifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputItem {
    Classified(RawClassification),
    Unclassified(ClassificationRequest),
}

pub fn parse_batch(raw: &str) -> Result<Vec<InputItem>> {
    serde_json::from_str(raw).context("batch must be a json array of items")
}

pub fn load_batch(path: &Path) -> Result<Vec<InputItem>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch at {}", path.display()))?;
    parse_batch(&raw).with_context(|| format!("invalid batch at {}", path.display()))
}

/// Classifies whatever still needs it and keeps the input order.
pub async fn resolve_batch(
    items: Vec<InputItem>,
    classifier: &dyn ClassifierPort,
) -> Vec<RawClassification> {
    let requests: Vec<ClassificationRequest> = items
        .iter()
        .filter_map(|item| match item {
            InputItem::Unclassified(request) => Some(request.clone()),
            InputItem::Classified(_) => None,
        })
        .collect();
    let mut classified = classify_all(classifier, &requests).await.into_iter();

    items
        .into_iter()
        .filter_map(|item| match item {
            InputItem::Classified(raw) => Some(raw),
            InputItem::Unclassified(_) => classified.next(),
        })
        .collect()
}
