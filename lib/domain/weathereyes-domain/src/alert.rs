use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateResult;
use crate::label::WeatherLabel;
use crate::time::Millis;

/// Monotonic, 1-based alert identifier.
pub type AlertId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    DailySummary,
    StateChange,
    Scheduled,
    Custom,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::DailySummary => "daily_summary",
            AlertKind::StateChange => "state_change",
            AlertKind::Scheduled => "scheduled",
            AlertKind::Custom => "custom",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency tier. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl AlertPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertPriority::Low => "low",
            AlertPriority::Medium => "medium",
            AlertPriority::High => "high",
            AlertPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast snapshot attached to scheduled and trip alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub condition: WeatherLabel,
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub wind_kmh: Option<f64>,
    /// Percent, 0-100.
    #[serde(default)]
    pub rain_chance: Option<u8>,
}

impl Forecast {
    pub fn new(condition: WeatherLabel) -> Self {
        Self {
            condition,
            temperature_c: None,
            wind_kmh: None,
            rain_chance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertPayload {
    Summary(AggregateResult),
    Transition {
        from: WeatherLabel,
        to: WeatherLabel,
        confidence: f64,
    },
    Event {
        event_name: String,
        event_at: Millis,
        forecast: Forecast,
    },
    Trip {
        destination: String,
        departure_at: Millis,
        days: Vec<Forecast>,
    },
    Note {
        title: String,
        body: String,
    },
}

/// A recorded decision to notify. Only `sent` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: AlertId,
    pub kind: AlertKind,
    pub priority: AlertPriority,
    pub payload: AlertPayload,
    pub created_at: Millis,
    pub sent: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertStats {
    pub total: usize,
    pub sent: usize,
    pub pending: usize,
    pub by_kind: BTreeMap<AlertKind, usize>,
    pub by_priority: BTreeMap<AlertPriority, usize>,
    pub last_alert_at: Option<Millis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_by_urgency() {
        assert!(AlertPriority::Urgent > AlertPriority::High);
        assert!(AlertPriority::High > AlertPriority::Medium);
        assert!(AlertPriority::Medium > AlertPriority::Low);
    }

    #[test]
    fn transition_payload_serializes_with_type_tag() {
        let payload = AlertPayload::Transition {
            from: WeatherLabel::Sunny,
            to: WeatherLabel::Rainy,
            confidence: 0.92,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "transition");
        assert_eq!(value["from"], "sunny");
        assert_eq!(value["to"], "rainy");
    }

    #[test]
    fn stats_serialize_kind_keys_as_names() {
        let mut stats = AlertStats::default();
        stats.by_kind.insert(AlertKind::StateChange, 2);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["by_kind"]["state_change"], 2);
    }
}
