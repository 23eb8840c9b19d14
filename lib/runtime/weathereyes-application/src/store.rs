//! Append-only alert history for one monitored context.

use weathereyes_domain::{
    AlertEvent, AlertId, AlertKind, AlertPayload, AlertPriority, AlertStats, Millis, now_millis,
};

#[derive(Debug, Clone, Default)]
pub struct AlertStore {
    events: Vec<AlertEvent>,
    last_id: AlertId,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: AlertKind,
        priority: AlertPriority,
        payload: AlertPayload,
    ) -> &AlertEvent {
        self.record_at(kind, priority, payload, now_millis())
    }

    /// Appends a new unsent event stamped with `created_at`.
    pub fn record_at(
        &mut self,
        kind: AlertKind,
        priority: AlertPriority,
        payload: AlertPayload,
        created_at: Millis,
    ) -> &AlertEvent {
        self.last_id += 1;
        let event = AlertEvent {
            id: self.last_id,
            kind,
            priority,
            payload,
            created_at,
            sent: false,
        };
        tracing::info!(id = event.id, %kind, %priority, "alert recorded");
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    /// Flags the event as delivered. Unknown ids are ignored: a concurrent
    /// flush may have raced the caller. Returns whether the id was found.
    pub fn mark_sent(&mut self, id: AlertId) -> bool {
        // ids are strictly increasing in storage order
        match self.events.binary_search_by_key(&id, |event| event.id) {
            Ok(index) => {
                self.events[index].sent = true;
                true
            }
            Err(_) => false,
        }
    }

    pub fn get(&self, id: AlertId) -> Option<&AlertEvent> {
        self.events
            .binary_search_by_key(&id, |event| event.id)
            .ok()
            .map(|index| &self.events[index])
    }

    /// Unsent events in creation order.
    pub fn pending(&self) -> Vec<&AlertEvent> {
        self.events.iter().filter(|event| !event.sent).collect()
    }

    pub fn history(&self) -> &[AlertEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn stats(&self) -> AlertStats {
        let mut stats = AlertStats {
            total: self.events.len(),
            last_alert_at: self.events.last().map(|event| event.created_at),
            ..Default::default()
        };
        for event in &self.events {
            if event.sent {
                stats.sent += 1;
            }
            *stats.by_kind.entry(event.kind).or_default() += 1;
            *stats.by_priority.entry(event.priority).or_default() += 1;
        }
        stats.pending = stats.total - stats.sent;
        stats
    }
}
