//! Confidence normalization.
//!
//! Every upstream confidence, whatever its shape, ends up in [0, 1]. Nothing
//! here fails: input that carries no usable number resolves to a policy
//! default that depends on whether the classifier committed to a label.

use weathereyes_domain::{Millis, Observation, RawClassification, RawConfidence, WeatherLabel};

pub use weathereyes_domain::{
    DEFAULT_LABELED_CONFIDENCE, DEFAULT_UNKNOWN_CONFIDENCE, default_confidence,
};

pub fn normalize_confidence(raw: &RawConfidence, label: WeatherLabel) -> f64 {
    match raw {
        RawConfidence::Number(value) => {
            clamp_unit(*value).unwrap_or_else(|| default_confidence(label))
        }
        RawConfidence::Text(text) => match first_number(text) {
            Some(value) => {
                let scaled = if value > 1.0 { value / 100.0 } else { value };
                clamp_unit(scaled).unwrap_or_else(|| default_confidence(label))
            }
            None => default_confidence(label),
        },
        RawConfidence::Missing => default_confidence(label),
    }
}

fn clamp_unit(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(0.0, 1.0))
    }
}

/// First decimal number in `text`, with an optional leading minus sign and
/// fractional part (`"85%"` → 85, `"conf: .5"` → 0.5, `"-3"` → -3).
pub fn first_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let starts_digit = bytes[i].is_ascii_digit();
        let starts_fraction =
            bytes[i] == b'.' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit());
        if !starts_digit && !starts_fraction {
            i += 1;
            continue;
        }

        let negative = i > 0 && bytes[i - 1] == b'-';
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i < bytes.len()
            && bytes[i] == b'.'
            && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit())
        {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }

        let value: f64 = text[start..i].parse().ok()?;
        return Some(if negative { -value } else { value });
    }
    None
}

/// Turns an unvalidated classifier verdict into an [`Observation`].
pub fn ingest(raw: &RawClassification, timestamp: Millis) -> Observation {
    let label = WeatherLabel::parse(&raw.label);
    let confidence = normalize_confidence(&raw.confidence, label);
    Observation::new(label, confidence, raw.source_id.clone(), timestamp)
}
