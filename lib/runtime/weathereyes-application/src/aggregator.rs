//! Consensus over a batch of observations.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use weathereyes_domain::{AggregateOutcome, AggregateResult, LabelStats, Observation, WeatherLabel};

/// Combines single-item guesses into a dominant label.
///
/// `unknown` observations count toward `sample_size` only. The dominant label
/// has the highest count; ties go to the higher mean confidence, then to the
/// label seen first in input order, so identical input always gives the same
/// answer. `aggregate_confidence` is the mean over every valid observation,
/// not just the winner's.
pub fn aggregate(observations: &[Observation]) -> AggregateOutcome {
    let sample_size = observations.len();
    let mut distribution: BTreeMap<WeatherLabel, LabelStats> = BTreeMap::new();
    let mut first_seen: HashMap<WeatherLabel, usize> = HashMap::new();
    let mut confidence_total = 0.0;
    let mut valid_size = 0;

    for (index, obs) in observations.iter().enumerate() {
        if !obs.label.is_known() {
            continue;
        }
        valid_size += 1;
        confidence_total += obs.confidence;
        first_seen.entry(obs.label).or_insert(index);

        let stats = distribution.entry(obs.label).or_default();
        stats.count += 1;
        stats.confidence_sum += obs.confidence;
        stats.member_ids.push(obs.source_id.clone());
    }

    let Some(dominant_label) = pick_dominant(&distribution, &first_seen) else {
        tracing::debug!(sample_size, "no valid observations in batch");
        return AggregateOutcome::EmptyEvidence { sample_size };
    };

    let aggregate_confidence = confidence_total / valid_size as f64;
    tracing::debug!(
        %dominant_label,
        aggregate_confidence,
        sample_size,
        valid_size,
        "aggregated batch"
    );

    AggregateOutcome::Aggregated(AggregateResult {
        dominant_label,
        aggregate_confidence,
        distribution,
        sample_size,
        valid_size,
    })
}

fn pick_dominant(
    distribution: &BTreeMap<WeatherLabel, LabelStats>,
    first_seen: &HashMap<WeatherLabel, usize>,
) -> Option<WeatherLabel> {
    distribution
        .iter()
        .max_by(|(a_label, a), (b_label, b)| {
            a.count
                .cmp(&b.count)
                .then_with(|| compare_means(a.mean_confidence(), b.mean_confidence()))
                // earlier first sighting wins, so compare reversed
                .then_with(|| first_seen[b_label].cmp(&first_seen[a_label]))
        })
        .map(|(label, _)| *label)
}

/// Means closer than this count as tied, so float noise never outranks
/// first-seen order.
const MEAN_EPSILON: f64 = 1e-9;

fn compare_means(a: f64, b: f64) -> Ordering {
    if (a - b).abs() < MEAN_EPSILON {
        Ordering::Equal
    } else {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}
