//! Buyer priority score.
//!
//! Weighted average of normalized metrics. Weights are request-scoped, need not
//! sum to one, and are renormalized over the metrics that actually contributed.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::models::{AircraftRecord, Metric};
use crate::scoring::bounds::ScoringContext;
use crate::scoring::normalize::{clamp_score, normalize, NEUTRAL_SCORE};

/// Buyer-chosen weight per metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityWeights(BTreeMap<Metric, Decimal>);

impl PriorityWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, metric: Metric, weight: Decimal) -> Self {
        self.0.insert(metric, weight);
        self
    }

    pub fn insert(&mut self, metric: Metric, weight: Decimal) {
        self.0.insert(metric, weight);
    }

    /// Weights that can contribute (strictly positive), in metric order.
    pub fn active(&self) -> impl Iterator<Item = (Metric, Decimal)> + '_ {
        self.0
            .iter()
            .filter(|(_, w)| **w > Decimal::ZERO)
            .map(|(m, w)| (*m, *w))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Metric, Decimal)> for PriorityWeights {
    fn from_iter<I: IntoIterator<Item = (Metric, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One metric's contribution to the priority score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityComponent {
    pub metric: Metric,
    pub raw_value: Option<Decimal>,
    pub normalized: Decimal,
    pub weight: Decimal,
    pub weighted: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityScore {
    pub score: Decimal,
    pub components: Vec<PriorityComponent>,
}

/// Compute the priority score of `record` against bounds from `ctx`.
///
/// Metrics the record has no value for are skipped and their weight leaves the
/// denominator. With no usable weight the score is a neutral 50.
pub fn priority_score(
    record: &AircraftRecord,
    weights: &PriorityWeights,
    ctx: &ScoringContext<'_>,
) -> PriorityScore {
    debug_assert!(
        ctx.contains(record),
        "record {} scored against a context built from a different candidate set",
        record.id
    );

    let mut components = Vec::new();

    for (metric, weight) in weights.active() {
        let Some(raw) = record.metric(metric) else {
            continue;
        };

        let normalized = normalize(metric, Some(raw), &ctx.bounds(metric));
        components.push(PriorityComponent {
            metric,
            raw_value: Some(raw),
            normalized,
            weight,
            weighted: normalized.saturating_mul(weight),
        });
    }

    let score = weighted_average(&components).map_or(NEUTRAL_SCORE, clamp_score);
    PriorityScore { score, components }
}

/// Weighted mean of the normalized scores, or `None` with no usable weight.
///
/// Weights too large to sum exactly are rescaled by the largest weight first.
fn weighted_average(components: &[PriorityComponent]) -> Option<Decimal> {
    let exact = components.iter().try_fold((Decimal::ZERO, Decimal::ZERO), |(sum, total), c| {
        Some((
            sum.checked_add(c.normalized.checked_mul(c.weight)?)?,
            total.checked_add(c.weight)?,
        ))
    });

    let (sum, total) = match exact {
        Some(totals) => totals,
        None => {
            let top = components.iter().map(|c| c.weight).max()?;
            components.iter().fold((Decimal::ZERO, Decimal::ZERO), |(sum, total), c| {
                let share = c.weight / top;
                (sum + c.normalized * share, total + share)
            })
        }
    };

    (total > Decimal::ZERO).then(|| sum / total)
}
