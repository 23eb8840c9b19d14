//! Parsing of free-form vision model replies.
//!
//! The model is asked for a JSON object with `weather_condition` and
//! `confidence`. Replies that are not JSON fall back to a keyword scan.

use serde::Deserialize;

use weathereyes_domain::{RawClassification, RawConfidence, WeatherLabel};

use crate::keywords::match_keywords;

pub const TEXT_MATCH_CONFIDENCE: f64 = 0.7;
pub const TEXT_MISS_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Deserialize)]
struct VisionReply {
    #[serde(default)]
    weather_condition: Option<String>,
    #[serde(default)]
    confidence: RawConfidence,
}

pub fn parse_vision_reply(text: &str, source_id: &str) -> RawClassification {
    if let Ok(reply) = serde_json::from_str::<VisionReply>(strip_code_fence(text)) {
        let label = reply
            .weather_condition
            .unwrap_or_else(|| WeatherLabel::Unknown.as_str().to_string());
        return RawClassification::new(label, reply.confidence, source_id);
    }

    tracing::debug!(source_id, "vision reply is not json, scanning text");
    match match_keywords(text) {
        Some(label) => RawClassification::new(label.as_str(), TEXT_MATCH_CONFIDENCE, source_id),
        None => RawClassification::new(
            WeatherLabel::Unknown.as_str(),
            TEXT_MISS_CONFIDENCE,
            source_id,
        ),
    }
}

/// Models like to wrap JSON in a ```json fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_reply_is_taken_verbatim() {
        let raw = parse_vision_reply(
            r#"{"weather_condition": "cloudy", "confidence": 0.87, "description": "grey sky"}"#,
            "img-1",
        );
        assert_eq!(raw.label, "cloudy");
        assert_eq!(raw.confidence, RawConfidence::Number(0.87));
        assert_eq!(raw.source_id, "img-1");
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let raw = parse_vision_reply(
            "```json\n{\"weather_condition\": \"snow\", \"confidence\": \"91%\"}\n```",
            "img-2",
        );
        assert_eq!(raw.label, "snow");
        assert_eq!(raw.confidence, RawConfidence::Text("91%".into()));
    }

    #[test]
    fn prose_reply_falls_back_to_keywords() {
        let raw = parse_vision_reply("Na zdjęciu widać burza i ciemne niebo", "img-3");
        assert_eq!(raw.label, "stormy");
        assert_eq!(raw.confidence, RawConfidence::Number(0.7));

        let raw = parse_vision_reply("I cannot tell from this picture.", "img-4");
        assert_eq!(raw.label, "unknown");
        assert_eq!(raw.confidence, RawConfidence::Number(0.5));
    }

    #[test]
    fn json_without_condition_is_unknown() {
        let raw = parse_vision_reply(r#"{"confidence": 0.2}"#, "img-5");
        assert_eq!(raw.label, "unknown");
    }
}
