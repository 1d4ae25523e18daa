//! Condition components of the cohort priority score.
//!
//! Each component starts from an absolute reading (remaining engine life, a
//! condition label, an avionics tier, inspection recency) and is then turned
//! into a percentile position among the cohort. A cohort of one keeps the
//! absolute reading.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::models::AircraftRecord;
use crate::cohort::percentile::percentile_rank;
use crate::cohort::tables::{avionics_tier, EngineTboTable, ResaleWeights};
use crate::scoring::normalize::clamp_score;

/// Absolute readings for one record before cohort ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentReadings {
    pub engine_remaining_hours: Decimal,
    pub engine_interval_hours: Decimal,
    pub interior: Decimal,
    pub avionics: Decimal,
    pub maintenance: Decimal,
    pub paint: Decimal,
}

impl ComponentReadings {
    pub fn from_record(record: &AircraftRecord, tbo: &EngineTboTable, as_of: NaiveDate) -> Self {
        let interval = tbo.interval(record.engine_model.as_deref());
        Self {
            engine_remaining_hours: remaining_engine_hours(record, interval),
            engine_interval_hours: interval,
            interior: record.interior_condition.score(),
            avionics: Decimal::from(avionics_tier(record.avionics_description.as_deref())),
            maintenance: inspection_band(record.last_annual_inspection_date, as_of),
            paint: record.exterior_condition.score(),
        }
    }

    fn engine_life_pct(&self) -> Decimal {
        if self.engine_interval_hours <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        clamp_score(self.engine_remaining_hours / self.engine_interval_hours * dec!(100))
    }
}

/// Cohort-relative component scores, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub engine_hours: Decimal,
    pub interior_quality: Decimal,
    pub avionics_rank: Decimal,
    pub maintenance_recency: Decimal,
    pub paint_condition: Decimal,
}

impl ComponentScores {
    /// Weighted composite before renormalization against the cohort best.
    pub fn composite(&self, weights: &ResaleWeights) -> Decimal {
        [
            (self.engine_hours, weights.engine),
            (self.interior_quality, weights.interior),
            (self.avionics_rank, weights.avionics),
            (self.maintenance_recency, weights.maintenance),
            (self.paint_condition, weights.paint),
        ]
        .into_iter()
        .fold(Decimal::ZERO, |sum, (score, weight)| {
            sum.saturating_add(score.saturating_mul(weight))
        })
    }
}

/// Hours left before overhaul. Unknown usage counts as no remaining life.
pub fn remaining_engine_hours(record: &AircraftRecord, interval: Decimal) -> Decimal {
    match record.engine_hours_since_new {
        Some(hours) if hours >= Decimal::ZERO => (interval - hours).max(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Recency band of the last annual inspection. Missing date scores 0.
pub fn inspection_band(last_inspection: Option<NaiveDate>, as_of: NaiveDate) -> Decimal {
    let Some(date) = last_inspection else {
        return Decimal::ZERO;
    };

    match (as_of - date).num_days() {
        d if d < 90 => dec!(100),
        d if d < 180 => dec!(80),
        d if d < 365 => dec!(60),
        d if d < 500 => dec!(40),
        _ => dec!(20),
    }
}

/// Rank every member's readings against the whole cohort.
pub fn rank_components(cohort: &[ComponentReadings]) -> Vec<ComponentScores> {
    let engine = column(cohort, |r| r.engine_remaining_hours);
    let interior = column(cohort, |r| r.interior);
    let avionics = column(cohort, |r| r.avionics);
    let maintenance = column(cohort, |r| r.maintenance);
    let paint = column(cohort, |r| r.paint);

    cohort
        .iter()
        .map(|r| ComponentScores {
            engine_hours: percentile_rank(r.engine_remaining_hours, &engine)
                .unwrap_or_else(|| r.engine_life_pct()),
            interior_quality: percentile_rank(r.interior, &interior).unwrap_or(r.interior),
            avionics_rank: percentile_rank(r.avionics, &avionics).unwrap_or(r.avionics),
            maintenance_recency: percentile_rank(r.maintenance, &maintenance)
                .unwrap_or(r.maintenance),
            paint_condition: percentile_rank(r.paint, &paint).unwrap_or(r.paint),
        })
        .collect()
}

fn column(
    cohort: &[ComponentReadings],
    reading: impl Fn(&ComponentReadings) -> Decimal,
) -> Vec<Decimal> {
    cohort.iter().map(reading).collect()
}
