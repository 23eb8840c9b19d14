use anyhow::Result;
use serde::Serialize;

use weathereyes_domain::{
    AggregateOutcome, AggregateResult, AlertEvent, AlertId, AlertKind, AlertPayload,
    AlertPriority, AlertStats, AlertsConfig, Forecast, Millis, Observation, RawClassification,
    WeatherLabel,
};

use crate::aggregator::aggregate;
use crate::normalizer::ingest;
use crate::schedule::DailySchedule;
use crate::store::AlertStore;
use crate::tracker::{StateTracker, TransitionOutcome};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
/// Trip alerts carry at most this many forecast days.
pub const TRIP_FORECAST_DAYS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub confidence_threshold: f64,
    pub enable_change_alerts: bool,
    pub event_alert_hours_ahead: f64,
    pub daily_summary: DailySchedule,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            enable_change_alerts: true,
            event_alert_hours_ahead: 2.0,
            daily_summary: DailySchedule::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &AlertsConfig) -> Result<Self> {
        Ok(Self {
            confidence_threshold: config.min_confidence_threshold,
            enable_change_alerts: config.enable_change_alerts,
            event_alert_hours_ahead: config.event_alert_hours_ahead,
            daily_summary: DailySchedule::parse(&config.daily_summary_time)?,
        })
    }
}

/// What one pass of the pipeline did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub aggregate: AggregateOutcome,
    /// `None` when the batch had no evidence to compare.
    pub transition: Option<TransitionOutcome>,
    pub alert_id: Option<AlertId>,
}

/// Decision engine for one monitored context.
///
/// Owns the change-detection baseline and the alert history. Callers must
/// serialize access per context; see [`crate::ContextRegistry`].
#[derive(Debug, Clone)]
pub struct WeatherEngine {
    settings: EngineSettings,
    tracker: StateTracker,
    store: AlertStore,
    last_aggregate: Option<AggregateResult>,
    last_summary_at: Option<Millis>,
}

impl WeatherEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            tracker: StateTracker::new(settings.confidence_threshold),
            settings,
            store: AlertStore::new(),
            last_aggregate: None,
            last_summary_at: None,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn last_dominant_label(&self) -> Option<WeatherLabel> {
        self.tracker.last_dominant_label()
    }

    pub fn last_aggregate(&self) -> Option<&AggregateResult> {
        self.last_aggregate.as_ref()
    }

    pub fn store(&self) -> &AlertStore {
        &self.store
    }

    /// Normalizes raw classifier output and runs the pipeline on it.
    pub fn ingest(&mut self, raws: &[RawClassification], now: Millis) -> PipelineReport {
        let observations: Vec<Observation> = raws.iter().map(|raw| ingest(raw, now)).collect();
        self.process(&observations, now)
    }

    /// Aggregate, classify, record.
    pub fn process(&mut self, observations: &[Observation], now: Millis) -> PipelineReport {
        let outcome = aggregate(observations);
        let Some(result) = outcome.result() else {
            return PipelineReport {
                aggregate: outcome,
                transition: None,
                alert_id: None,
            };
        };

        let transition = self
            .tracker
            .observe(result.dominant_label, result.aggregate_confidence);
        let alert_id = match transition.decision() {
            Some(decision) if self.settings.enable_change_alerts => {
                let payload = AlertPayload::Transition {
                    from: decision.from,
                    to: decision.to,
                    confidence: decision.confidence,
                };
                let event =
                    self.store
                        .record_at(AlertKind::StateChange, decision.priority, payload, now);
                Some(event.id)
            }
            Some(decision) => {
                tracing::debug!(
                    from = %decision.from,
                    to = %decision.to,
                    "change alerts disabled, baseline updated silently"
                );
                None
            }
            None => None,
        };

        self.last_aggregate = Some(result.clone());
        PipelineReport {
            aggregate: outcome,
            transition: Some(transition),
            alert_id,
        }
    }

    pub fn record_summary(&mut self, result: AggregateResult, now: Millis) -> AlertId {
        self.last_summary_at = Some(now);
        self.store
            .record_at(
                AlertKind::DailySummary,
                AlertPriority::Low,
                AlertPayload::Summary(result),
                now,
            )
            .id
    }

    /// Records a summary of the latest batch if today's slot has passed and
    /// none was made since.
    pub fn record_daily_summary_if_due(&mut self, now: Millis) -> Option<AlertId> {
        if !self.settings.daily_summary.is_due(self.last_summary_at, now) {
            return None;
        }
        let result = self.last_aggregate.clone()?;
        Some(self.record_summary(result, now))
    }

    /// Records a pre-event alert when the event starts within the configured
    /// lead time. Events further out or already started are ignored.
    pub fn record_event_alert(
        &mut self,
        event_name: impl Into<String>,
        event_at: Millis,
        forecast: Forecast,
        now: Millis,
    ) -> Option<AlertId> {
        let hours_until = event_at.saturating_sub(now) as f64 / MILLIS_PER_HOUR;
        if hours_until < 0.0 || hours_until > self.settings.event_alert_hours_ahead {
            return None;
        }
        let payload = AlertPayload::Event {
            event_name: event_name.into(),
            event_at,
            forecast,
        };
        Some(
            self.store
                .record_at(AlertKind::Scheduled, AlertPriority::Medium, payload, now)
                .id,
        )
    }

    pub fn record_trip_alert(
        &mut self,
        destination: impl Into<String>,
        departure_at: Millis,
        mut days: Vec<Forecast>,
        now: Millis,
    ) -> AlertId {
        days.truncate(TRIP_FORECAST_DAYS);
        let payload = AlertPayload::Trip {
            destination: destination.into(),
            departure_at,
            days,
        };
        self.store
            .record_at(AlertKind::Custom, AlertPriority::Low, payload, now)
            .id
    }

    pub fn record_custom(
        &mut self,
        priority: AlertPriority,
        title: impl Into<String>,
        body: impl Into<String>,
        now: Millis,
    ) -> AlertId {
        let payload = AlertPayload::Note {
            title: title.into(),
            body: body.into(),
        };
        self.store
            .record_at(AlertKind::Custom, priority, payload, now)
            .id
    }

    /// Snapshot of unsent alerts, cloned so the caller can release its lock
    /// before doing network work.
    pub fn pending(&self) -> Vec<AlertEvent> {
        self.store.pending().into_iter().cloned().collect()
    }

    pub fn mark_sent(&mut self, id: AlertId) -> bool {
        self.store.mark_sent(id)
    }

    pub fn stats(&self) -> AlertStats {
        self.store.stats()
    }
}

impl Default for WeatherEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}
