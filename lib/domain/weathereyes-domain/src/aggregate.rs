use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::label::WeatherLabel;

/// Per-label accumulation inside one batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelStats {
    pub count: usize,
    pub confidence_sum: f64,
    /// Source ids in input order. Diagnostics only.
    pub member_ids: Vec<String>,
}

impl LabelStats {
    pub fn mean_confidence(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.confidence_sum / self.count as f64
        }
    }
}

/// Consensus over one batch of observations. Recomputed fresh for every
/// batch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub dominant_label: WeatherLabel,
    /// Full precision mean over all valid observations.
    pub aggregate_confidence: f64,
    pub distribution: BTreeMap<WeatherLabel, LabelStats>,
    pub sample_size: usize,
    pub valid_size: usize,
}

impl AggregateResult {
    /// Aggregate confidence rounded to 3 decimals, for display only.
    pub fn display_confidence(&self) -> f64 {
        (self.aggregate_confidence * 1000.0).round() / 1000.0
    }

    pub fn excluded_count(&self) -> usize {
        self.sample_size - self.valid_size
    }

    pub fn dominant_stats(&self) -> Option<&LabelStats> {
        self.distribution.get(&self.dominant_label)
    }
}

/// Result of aggregating a batch. A batch with no valid observation never
/// yields a dominant label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AggregateOutcome {
    Aggregated(AggregateResult),
    EmptyEvidence { sample_size: usize },
}

impl AggregateOutcome {
    pub fn result(&self) -> Option<&AggregateResult> {
        match self {
            AggregateOutcome::Aggregated(result) => Some(result),
            AggregateOutcome::EmptyEvidence { .. } => None,
        }
    }

    pub fn into_result(self) -> Option<AggregateResult> {
        match self {
            AggregateOutcome::Aggregated(result) => Some(result),
            AggregateOutcome::EmptyEvidence { .. } => None,
        }
    }

    pub fn sample_size(&self) -> usize {
        match self {
            AggregateOutcome::Aggregated(result) => result.sample_size,
            AggregateOutcome::EmptyEvidence { sample_size } => *sample_size,
        }
    }
}
