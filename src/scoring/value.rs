//! Value ("spreadsheet") score.
//!
//! Averages the manufacturer-published per-dollar metrics on a fixed linear
//! scale. Independent of the candidate set.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::models::{AircraftRecord, Metric};
use crate::scoring::normalize::{clamp_score, SCORE_MAX};

/// Multiplier mapping typical per-dollar ratios onto 0..=100.
const PER_DOLLAR_SCALE: Decimal = dec!(10);

/// Value score plus the per-dollar inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueScore {
    pub score: Decimal,
    pub speed_per_dollar: Option<Decimal>,
    pub range_per_dollar: Option<Decimal>,
    pub performance_per_dollar: Option<Decimal>,
    pub efficiency_per_dollar: Option<Decimal>,
    pub all_around_per_dollar: Option<Decimal>,
}

/// Compute the value score. Zero when no per-dollar metric is usable.
pub fn value_score(record: &AircraftRecord) -> ValueScore {
    let scaled: Vec<Decimal> = Metric::PER_DOLLAR
        .into_iter()
        .filter_map(|m| record.metric(m))
        .filter(|v| *v > Decimal::ZERO)
        .map(|v| v.checked_mul(PER_DOLLAR_SCALE).map_or(SCORE_MAX, |s| s.min(SCORE_MAX)))
        .collect();

    let score = if scaled.is_empty() {
        Decimal::ZERO
    } else {
        let total: Decimal = scaled.iter().sum();
        clamp_score(total / Decimal::from(scaled.len()))
    };

    ValueScore {
        score,
        speed_per_dollar: record.speed_per_dollar,
        range_per_dollar: record.range_per_dollar,
        performance_per_dollar: record.performance_per_dollar,
        efficiency_per_dollar: record.efficiency_per_dollar,
        all_around_per_dollar: record.all_around_per_dollar,
    }
}
