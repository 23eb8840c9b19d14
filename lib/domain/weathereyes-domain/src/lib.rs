//! Domain models and invariants.

pub mod aggregate;
pub mod alert;
pub mod config;
pub mod label;
pub mod notification;
pub mod observation;
pub mod time;

pub use aggregate::{AggregateOutcome, AggregateResult, LabelStats};
pub use alert::{
    AlertEvent, AlertId, AlertKind, AlertPayload, AlertPriority, AlertStats, Forecast,
};
pub use config::{AlertsConfig, NotificationsConfig, WeatherEyesConfig};
pub use label::WeatherLabel;
pub use notification::{NotificationChannel, RenderedMessage};
pub use observation::{
    DEFAULT_LABELED_CONFIDENCE, DEFAULT_UNKNOWN_CONFIDENCE, Observation, RawClassification,
    RawConfidence, default_confidence,
};
pub use time::{Millis, now_millis};
