use weathereyes_domain::{RawClassification, RawConfidence, WeatherLabel};
use weathereyes_ports::{ClassificationRequest, ClassifierPort};

/// Classifies every request. A failed item becomes an `unknown` reading with
/// zero confidence instead of aborting the batch, so it still counts toward
/// the sample size.
pub async fn classify_all(
    classifier: &dyn ClassifierPort,
    requests: &[ClassificationRequest],
) -> Vec<RawClassification> {
    let mut out = Vec::with_capacity(requests.len());
    for request in requests {
        match classifier.classify(request).await {
            Ok(raw) => out.push(raw),
            Err(err) => {
                tracing::warn!(source_id = %request.source_id, "classification failed: {err:#}");
                out.push(RawClassification::new(
                    WeatherLabel::Unknown.as_str(),
                    RawConfidence::Number(0.0),
                    request.source_id.clone(),
                ));
            }
        }
    }
    out
}
