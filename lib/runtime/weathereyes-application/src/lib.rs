//! Weather signal aggregation and alert decision engine.
//!
//! Data flows one way: raw classifier output → [`normalizer`] →
//! [`aggregator`] → [`tracker`] → [`store`]. [`WeatherEngine`] runs that
//! sequence for one monitored context; [`ContextRegistry`] keeps one engine
//! per context. Nothing here blocks or performs I/O.
//!
//! # Examples
//! ```rust
//! use weathereyes_application::{EngineSettings, WeatherEngine};
//! use weathereyes_domain::RawClassification;
//!
//! let mut engine = WeatherEngine::new(EngineSettings::default());
//! engine.ingest(&[RawClassification::new("sunny", 0.9, "img-1")], 0);
//! let report = engine.ingest(&[RawClassification::new("stormy", "95%", "img-2")], 1);
//! assert!(report.alert_id.is_some());
//! ```

pub mod aggregator;
pub mod engine;
pub mod intake;
pub mod normalizer;
pub mod registry;
pub mod schedule;
pub mod store;
pub mod tracker;

pub use aggregator::aggregate;
pub use engine::{EngineSettings, PipelineReport, WeatherEngine};
pub use intake::classify_all;
pub use normalizer::{ingest, normalize_confidence};
pub use registry::ContextRegistry;
pub use schedule::DailySchedule;
pub use store::AlertStore;
pub use tracker::{AlertDecision, StateTracker, TransitionOutcome, classify_transition};
