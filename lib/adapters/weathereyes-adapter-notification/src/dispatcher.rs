use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

use weathereyes_application::WeatherEngine;
use weathereyes_domain::now_millis;
use weathereyes_ports::NotificationPort;

use crate::render::render_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FlushReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Pushes pending alerts of one context through a [`NotificationPort`] and
/// acknowledges the ones that went out.
#[derive(Clone)]
pub struct AlertDispatcher {
    port: Arc<dyn NotificationPort>,
    location: String,
}

impl AlertDispatcher {
    pub fn new(port: Arc<dyn NotificationPort>, location: impl Into<String>) -> Self {
        Self {
            port,
            location: location.into(),
        }
    }

    /// Sends every pending alert once. The engine lock is only held to read
    /// the pending snapshot and to acknowledge, never across a send. Failed
    /// alerts stay pending for the next flush.
    pub async fn flush(&self, engine: &Mutex<WeatherEngine>) -> FlushReport {
        let pending = engine.lock().expect("weather engine lock poisoned").pending();
        let mut report = FlushReport {
            attempted: pending.len(),
            ..Default::default()
        };

        for event in pending {
            let message = render_message(&event, &self.location);
            match self.port.send_notification(&message).await {
                Ok(()) => {
                    engine
                        .lock()
                        .expect("weather engine lock poisoned")
                        .mark_sent(event.id);
                    report.delivered += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to send alert {}: {:#}", event.id, e);
                    report.failed += 1;
                }
            }
        }

        if report.attempted > 0 {
            tracing::info!(
                attempted = report.attempted,
                delivered = report.delivered,
                failed = report.failed,
                "alert flush finished"
            );
        }
        report
    }

    /// Periodically records the daily summary when due and flushes.
    pub async fn watch(self: Arc<Self>, engine: Arc<Mutex<WeatherEngine>>, period: Duration) {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            {
                let mut engine = engine.lock().expect("weather engine lock poisoned");
                engine.record_daily_summary_if_due(now_millis());
            }
            self.flush(&engine).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use weathereyes_domain::{
        AlertPriority, NotificationChannel, RawClassification, RenderedMessage,
    };

    #[derive(Default)]
    struct RecordingPort {
        sent: Mutex<Vec<RenderedMessage>>,
        reject_priority: Option<AlertPriority>,
    }

    #[async_trait]
    impl NotificationPort for RecordingPort {
        async fn send_notification(&self, message: &RenderedMessage) -> Result<()> {
            if Some(message.priority) == self.reject_priority {
                bail!("channel down");
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn configure_channel(&self, _channel: NotificationChannel) -> Result<()> {
            Ok(())
        }
    }

    fn engine_with_change() -> Mutex<WeatherEngine> {
        let mut engine = WeatherEngine::default();
        engine.ingest(&[RawClassification::new("sunny", 0.9, "a")], 1);
        engine.ingest(&[RawClassification::new("stormy", 0.9, "b")], 2);
        engine.record_custom(AlertPriority::Low, "FYI", "note", 3);
        Mutex::new(engine)
    }

    #[tokio::test]
    async fn flush_marks_delivered_alerts_sent() {
        let port = Arc::new(RecordingPort::default());
        let dispatcher = AlertDispatcher::new(port.clone(), "Main Stage");
        let engine = engine_with_change();

        let report = dispatcher.flush(&engine).await;
        assert_eq!(
            report,
            FlushReport {
                attempted: 2,
                delivered: 2,
                failed: 0
            }
        );
        assert!(engine.lock().unwrap().pending().is_empty());

        let sent = port.sent.lock().unwrap();
        assert_eq!(sent[0].title, "Weather change detected");
        assert!(sent[0].short.contains("Main Stage"));
        assert_eq!(sent[1].title, "FYI");

        // nothing left to send
        drop(sent);
        assert_eq!(dispatcher.flush(&engine).await.attempted, 0);
    }

    #[tokio::test]
    async fn failed_alerts_stay_pending() {
        let port = Arc::new(RecordingPort {
            reject_priority: Some(AlertPriority::Urgent),
            ..Default::default()
        });
        let dispatcher = AlertDispatcher::new(port, "Main Stage");
        let engine = engine_with_change();

        let report = dispatcher.flush(&engine).await;
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);

        let engine = engine.lock().unwrap();
        let pending = engine.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].priority, AlertPriority::Urgent);
        assert_eq!(engine.stats().sent, 1);
    }
}
