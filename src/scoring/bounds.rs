//! Metric bounds and the per-request scoring context.
//!
//! Bounds are always derived from the record set being ranked in the current
//! request. A `ScoringContext` owns those bounds for exactly one ranking pass and
//! is passed explicitly to every scorer that needs it; nothing here is global.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::models::{AircraftRecord, Metric};

/// Observed (min, max) of a metric over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricBounds {
    pub min: Decimal,
    pub max: Decimal,
    /// Every usable value in the set was identical.
    pub uniform: bool,
}

impl MetricBounds {
    /// Bounds used when no record carries a usable value.
    pub const DEFAULT: MetricBounds = MetricBounds {
        min: Decimal::ZERO,
        max: Decimal::ONE,
        uniform: false,
    };

    pub fn span(&self) -> Decimal {
        self.max - self.min
    }
}

/// Compute bounds of `metric` over `records`.
///
/// Only present, strictly positive values participate. No usable values gives
/// `(0, 1)`; identical values give `(v, v + 1)`.
pub fn resolve_bounds(metric: Metric, records: &[&AircraftRecord]) -> MetricBounds {
    let mut values = records
        .iter()
        .filter_map(|r| r.metric(metric))
        .filter(|v| *v > Decimal::ZERO);

    let Some(first) = values.next() else {
        return MetricBounds::DEFAULT;
    };

    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min == max {
        return MetricBounds {
            min,
            max: max.checked_add(Decimal::ONE).unwrap_or(max),
            uniform: true,
        };
    }

    MetricBounds {
        min,
        max,
        uniform: false,
    }
}

/// Normalization basis for a single ranking pass.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    records: Vec<&'a AircraftRecord>,
    ids: HashSet<&'a str>,
    bounds: BTreeMap<Metric, MetricBounds>,
}

impl<'a> ScoringContext<'a> {
    /// Build a context over the exact candidate set about to be ranked.
    pub fn new(records: &[&'a AircraftRecord]) -> Self {
        let bounds = Metric::ALL
            .into_iter()
            .map(|metric| (metric, resolve_bounds(metric, records)))
            .collect();

        Self {
            records: records.to_vec(),
            ids: records.iter().map(|r| r.id.as_str()).collect(),
            bounds,
        }
    }

    pub fn bounds(&self, metric: Metric) -> MetricBounds {
        self.bounds
            .get(&metric)
            .copied()
            .unwrap_or(MetricBounds::DEFAULT)
    }

    /// Whether `record` belongs to the set these bounds were computed from.
    pub fn contains(&self, record: &AircraftRecord) -> bool {
        self.ids.contains(record.id.as_str())
    }

    /// Whether `records` is exactly the set these bounds were computed from.
    pub fn matches(&self, records: &[&AircraftRecord]) -> bool {
        records.len() == self.records.len()
            && records.iter().map(|r| r.id.as_str()).collect::<HashSet<_>>() == self.ids
    }

    pub fn records(&self) -> &[&'a AircraftRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
