use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::label::WeatherLabel;
use crate::time::Millis;

/// Confidence assumed for a committed label that came without a usable one.
pub const DEFAULT_LABELED_CONFIDENCE: f64 = 0.7;
/// Confidence assumed when the classifier itself reported `unknown`.
pub const DEFAULT_UNKNOWN_CONFIDENCE: f64 = 0.3;

pub fn default_confidence(label: WeatherLabel) -> f64 {
    if label.is_known() {
        DEFAULT_LABELED_CONFIDENCE
    } else {
        DEFAULT_UNKNOWN_CONFIDENCE
    }
}

/// Confidence as reported by an upstream classifier, before normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RawConfidence {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<Value> for RawConfidence {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(RawConfidence::Number)
                .unwrap_or(RawConfidence::Missing),
            Value::String(s) => RawConfidence::Text(s),
            _ => RawConfidence::Missing,
        }
    }
}

impl From<RawConfidence> for Value {
    fn from(raw: RawConfidence) -> Self {
        match raw {
            RawConfidence::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            RawConfidence::Text(s) => Value::String(s),
            RawConfidence::Missing => Value::Null,
        }
    }
}

impl From<f64> for RawConfidence {
    fn from(value: f64) -> Self {
        RawConfidence::Number(value)
    }
}

impl From<&str> for RawConfidence {
    fn from(value: &str) -> Self {
        RawConfidence::Text(value.to_string())
    }
}

impl<T: Into<RawConfidence>> From<Option<T>> for RawConfidence {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawConfidence::Missing)
    }
}

/// One classifier verdict exactly as it came back: label text unvalidated,
/// confidence of any shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClassification {
    pub label: String,
    #[serde(default)]
    pub confidence: RawConfidence,
    #[serde(alias = "id")]
    pub source_id: String,
}

impl RawClassification {
    pub fn new(
        label: impl Into<String>,
        confidence: impl Into<RawConfidence>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            confidence: confidence.into(),
            source_id: source_id.into(),
        }
    }
}

/// A single normalized judgment about one item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: WeatherLabel,
    /// Always within [0, 1].
    pub confidence: f64,
    pub source_id: String,
    pub timestamp: Millis,
}

impl Observation {
    /// Clamps `confidence` into [0, 1]; NaN becomes the label's default.
    pub fn new(
        label: WeatherLabel,
        confidence: f64,
        source_id: impl Into<String>,
        timestamp: Millis,
    ) -> Self {
        Self {
            label,
            confidence: if confidence.is_nan() {
                default_confidence(label)
            } else {
                confidence.clamp(0.0, 1.0)
            },
            source_id: source_id.into(),
            timestamp,
        }
    }
}
