use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of weather conditions a classifier can report.
///
/// `Unknown` is a real member: it means "no usable signal" and is excluded
/// from every aggregation denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherLabel {
    Sunny,
    Cloudy,
    Rainy,
    Snow,
    Stormy,
    Foggy,
    Clear,
    Unknown,
}

impl WeatherLabel {
    pub const ALL: [WeatherLabel; 8] = [
        WeatherLabel::Sunny,
        WeatherLabel::Cloudy,
        WeatherLabel::Rainy,
        WeatherLabel::Snow,
        WeatherLabel::Stormy,
        WeatherLabel::Foggy,
        WeatherLabel::Clear,
        WeatherLabel::Unknown,
    ];

    /// Coerces an unvalidated label string. Anything outside the set maps to
    /// `Unknown` instead of failing.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
            .unwrap_or(WeatherLabel::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeatherLabel::Sunny => "sunny",
            WeatherLabel::Cloudy => "cloudy",
            WeatherLabel::Rainy => "rainy",
            WeatherLabel::Snow => "snow",
            WeatherLabel::Stormy => "stormy",
            WeatherLabel::Foggy => "foggy",
            WeatherLabel::Clear => "clear",
            WeatherLabel::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != WeatherLabel::Unknown
    }
}

impl fmt::Display for WeatherLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
