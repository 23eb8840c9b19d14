//! Change detection between consecutive consensus labels.
//!
//! States are the label set plus an uninitialized start. The only way out of
//! the start is a silent adoption of the first trusted label; afterwards the
//! baseline moves only when a gated reading reports a different label. A
//! reading below the confidence gate never touches the baseline.

use serde::{Deserialize, Serialize};

use weathereyes_domain::{AlertPriority, WeatherLabel};

/// Directional transitions that warrant more than a medium alert. Urgent
/// entries are checked first, so a pair listed in both sets is urgent.
const URGENT_TRANSITIONS: &[(WeatherLabel, WeatherLabel)] = &[
    (WeatherLabel::Sunny, WeatherLabel::Stormy),
    (WeatherLabel::Clear, WeatherLabel::Stormy),
];

const HIGH_TRANSITIONS: &[(WeatherLabel, WeatherLabel)] = &[
    (WeatherLabel::Sunny, WeatherLabel::Rainy),
    (WeatherLabel::Cloudy, WeatherLabel::Rainy),
    (WeatherLabel::Clear, WeatherLabel::Stormy),
    (WeatherLabel::Sunny, WeatherLabel::Snow),
];

pub fn transition_priority(from: WeatherLabel, to: WeatherLabel) -> AlertPriority {
    let pair = (from, to);
    if URGENT_TRANSITIONS.contains(&pair) {
        AlertPriority::Urgent
    } else if HIGH_TRANSITIONS.contains(&pair) {
        AlertPriority::High
    } else {
        AlertPriority::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertDecision {
    pub from: WeatherLabel,
    pub to: WeatherLabel,
    pub confidence: f64,
    pub priority: AlertPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// Below the gate. The baseline is left as it was.
    Suppressed {
        previous: Option<WeatherLabel>,
        current: WeatherLabel,
        confidence: f64,
    },
    /// First trusted label for this context; adopted without an alert.
    Initialized { label: WeatherLabel },
    Unchanged { label: WeatherLabel },
    Changed(AlertDecision),
}

impl TransitionOutcome {
    pub fn decision(&self) -> Option<&AlertDecision> {
        match self {
            TransitionOutcome::Changed(decision) => Some(decision),
            _ => None,
        }
    }

    /// Label the tracker holds after this outcome is applied, given the label
    /// it held before.
    fn next_label(&self, previous: Option<WeatherLabel>) -> Option<WeatherLabel> {
        match self {
            TransitionOutcome::Suppressed { .. } => previous,
            TransitionOutcome::Initialized { label } | TransitionOutcome::Unchanged { label } => {
                Some(*label)
            }
            TransitionOutcome::Changed(decision) => Some(decision.to),
        }
    }
}

/// Pure classification of one candidate transition.
///
/// Equality with the threshold passes the gate.
pub fn classify_transition(
    previous: Option<WeatherLabel>,
    current: WeatherLabel,
    confidence: f64,
    confidence_threshold: f64,
) -> TransitionOutcome {
    if confidence.is_nan() || confidence < confidence_threshold {
        return TransitionOutcome::Suppressed {
            previous,
            current,
            confidence,
        };
    }
    match previous {
        None => TransitionOutcome::Initialized { label: current },
        Some(previous) if previous == current => TransitionOutcome::Unchanged { label: current },
        Some(previous) => TransitionOutcome::Changed(AlertDecision {
            from: previous,
            to: current,
            confidence,
            priority: transition_priority(previous, current),
        }),
    }
}

/// Holds the last trusted dominant label of one monitored context.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTracker {
    last_dominant_label: Option<WeatherLabel>,
    confidence_threshold: f64,
}

impl StateTracker {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            last_dominant_label: None,
            confidence_threshold,
        }
    }

    pub fn last_dominant_label(&self) -> Option<WeatherLabel> {
        self.last_dominant_label
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Classifies `current` against the baseline and applies the outcome.
    pub fn observe(&mut self, current: WeatherLabel, confidence: f64) -> TransitionOutcome {
        let previous = self.last_dominant_label;
        let outcome =
            classify_transition(previous, current, confidence, self.confidence_threshold);
        if let TransitionOutcome::Suppressed { .. } = outcome {
            tracing::debug!(
                ?previous,
                %current,
                confidence,
                threshold = self.confidence_threshold,
                "transition suppressed by confidence gate"
            );
        }
        self.last_dominant_label = outcome.next_label(previous);
        outcome
    }
}
