//! Buyer-preference fit ("match") score.
//!
//! Six axes, each 0..=100. An axis without a buyer preference scores 100, so
//! an empty profile matches every listing perfectly.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::models::{AircraftRecord, Condition};
use crate::cohort::components::remaining_engine_hours;
use crate::cohort::tables::{EngineTboTable, AVIONICS_FAMILIES};
use crate::scoring::normalize::{clamp_score, SCORE_MAX};

const DAYS_PER_MONTH: Decimal = dec!(30.44);
const WITHIN_HOURS_FLOOR: Decimal = dec!(80);
const FAMILY_MATCH: Decimal = dec!(80);
const NO_AVIONICS_MATCH: Decimal = dec!(20);

/// Relative importance of each match axis. Renormalized to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub hours: Decimal,
    pub engine: Decimal,
    pub avionics: Decimal,
    pub interior: Decimal,
    pub maintenance: Decimal,
    pub paint: Decimal,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            hours: Decimal::ONE,
            engine: Decimal::ONE,
            avionics: Decimal::ONE,
            interior: Decimal::ONE,
            maintenance: Decimal::ONE,
            paint: Decimal::ONE,
        }
    }
}

impl MatchWeights {
    fn as_array(&self) -> [Decimal; 6] {
        [
            self.hours,
            self.engine,
            self.avionics,
            self.interior,
            self.maintenance,
            self.paint,
        ]
    }

    /// Weights scaled to sum to 1. Negative entries count as 0; an all-zero
    /// set falls back to equal weights.
    pub fn normalized(&self) -> [Decimal; 6] {
        let mut raw = self.as_array().map(|w| w.max(Decimal::ZERO));
        let mut total = raw.iter().try_fold(Decimal::ZERO, |sum, w| sum.checked_add(*w));
        if total.is_none() {
            let top = raw.iter().copied().max().unwrap_or(Decimal::ONE);
            raw = raw.map(|w| w / top);
            total = Some(raw.iter().copied().sum());
        }
        match total {
            Some(total) if !total.is_zero() => raw.map(|w| w / total),
            _ => [Decimal::ONE / Decimal::from(raw.len()); 6],
        }
    }
}

/// What a buyer is looking for. Every threshold is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyerPreferenceProfile {
    pub max_total_hours: Option<Decimal>,
    pub min_engine_hours_remaining: Option<Decimal>,
    pub preferred_avionics: Option<String>,
    pub min_interior_rating: Option<Condition>,
    pub min_paint_rating: Option<Condition>,
    pub max_inspection_age_months: Option<Decimal>,
    pub weights: MatchWeights,
}

/// Per-axis match results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchBreakdown {
    pub score: Decimal,
    pub hours: Decimal,
    pub engine: Decimal,
    pub avionics: Decimal,
    pub interior: Decimal,
    pub maintenance: Decimal,
    pub paint: Decimal,
}

/// Score how well `record` fits `profile`.
pub fn match_score(
    record: &AircraftRecord,
    profile: &BuyerPreferenceProfile,
    tbo: &EngineTboTable,
    as_of: NaiveDate,
) -> MatchBreakdown {
    let hours = hours_match(record.airframe_total_time, profile.max_total_hours);
    let engine = engine_match(record, profile.min_engine_hours_remaining, tbo);
    let avionics = avionics_match(
        record.avionics_description.as_deref(),
        profile.preferred_avionics.as_deref(),
    );
    let interior = condition_match(record.interior_condition, profile.min_interior_rating);
    let maintenance = maintenance_match(
        record.last_annual_inspection_date,
        profile.max_inspection_age_months,
        as_of,
    );
    let paint = condition_match(record.exterior_condition, profile.min_paint_rating);

    let axes = [hours, engine, avionics, interior, maintenance, paint];
    let score: Decimal = axes
        .iter()
        .zip(profile.weights.normalized())
        .map(|(axis, weight)| *axis * weight)
        .sum();

    MatchBreakdown {
        score: clamp_score(score),
        hours,
        engine,
        avionics,
        interior,
        maintenance,
        paint,
    }
}

/// Within the cap scores 80..=100; above it decays linearly to 0 at twice the cap.
pub fn hours_match(total_hours: Option<Decimal>, max_hours: Option<Decimal>) -> Decimal {
    let Some(cap) = active(max_hours) else {
        return SCORE_MAX;
    };
    let Some(hours) = total_hours.filter(|h| *h > Decimal::ZERO) else {
        return Decimal::ZERO;
    };

    if hours <= cap {
        (SCORE_MAX - hours / cap * dec!(20)).max(WITHIN_HOURS_FLOOR)
    } else {
        // An overflowing excess is far past twice the cap.
        (hours - cap)
            .checked_div(cap)
            .and_then(|over| over.checked_mul(WITHIN_HOURS_FLOOR))
            .map_or(Decimal::ZERO, |penalty| {
                (WITHIN_HOURS_FLOOR - penalty).max(Decimal::ZERO)
            })
    }
}

pub fn engine_match(
    record: &AircraftRecord,
    min_remaining: Option<Decimal>,
    tbo: &EngineTboTable,
) -> Decimal {
    let Some(floor) = active(min_remaining) else {
        return SCORE_MAX;
    };

    let interval = tbo.interval(record.engine_model.as_deref());
    let remaining = remaining_engine_hours(record, interval);
    if remaining >= floor {
        SCORE_MAX
    } else {
        clamp_score(remaining / floor * SCORE_MAX)
    }
}

/// Exact keyword hit scores 100; another variant of the preferred suite's
/// family scores 80; anything else 20.
pub fn avionics_match(description: Option<&str>, preferred: Option<&str>) -> Decimal {
    let preferred = preferred.unwrap_or_default().trim().to_lowercase();
    if preferred.is_empty() {
        return SCORE_MAX;
    }

    let listing = description.unwrap_or_default().to_lowercase();
    if listing.contains(&preferred) {
        return SCORE_MAX;
    }

    let family_hit = AVIONICS_FAMILIES
        .iter()
        .filter(|(_, variants)| variants.contains(&preferred.as_str()))
        .any(|(_, variants)| variants.iter().any(|v| listing.contains(v)));

    if family_hit {
        FAMILY_MATCH
    } else {
        NO_AVIONICS_MATCH
    }
}

/// Meeting the minimum scores 100; a lower rating scores proportionally;
/// unrated scores 0.
pub fn condition_match(actual: Condition, minimum: Option<Condition>) -> Decimal {
    let Some(minimum) = minimum.filter(|m| m.is_rated()) else {
        return SCORE_MAX;
    };

    if actual >= minimum {
        SCORE_MAX
    } else if actual.is_rated() {
        Decimal::from(actual.ordinal()) / Decimal::from(minimum.ordinal()) * SCORE_MAX
    } else {
        Decimal::ZERO
    }
}

pub fn maintenance_match(
    last_inspection: Option<NaiveDate>,
    max_age_months: Option<Decimal>,
    as_of: NaiveDate,
) -> Decimal {
    let Some(max_months) = active(max_age_months) else {
        return SCORE_MAX;
    };
    let Some(date) = last_inspection else {
        return Decimal::ZERO;
    };

    let months = Decimal::from((as_of - date).num_days()) / DAYS_PER_MONTH;
    if months <= max_months {
        SCORE_MAX
    } else {
        (months - max_months)
            .checked_div(max_months)
            .and_then(|late| late.checked_mul(SCORE_MAX))
            .map_or(Decimal::ZERO, |penalty| clamp_score(SCORE_MAX - penalty))
    }
}

fn active(threshold: Option<Decimal>) -> Option<Decimal> {
    threshold.filter(|t| *t > Decimal::ZERO)
}

/// Buyer-facing label for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchLabel {
    #[serde(rename = "Perfect Match")]
    Perfect,
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Very Good Match")]
    VeryGood,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Fair Match")]
    Fair,
    #[serde(rename = "Poor Match")]
    Poor,
}

impl MatchLabel {
    pub fn from_score(score: Decimal) -> Self {
        match score {
            s if s >= dec!(95) => Self::Perfect,
            s if s >= dec!(85) => Self::Excellent,
            s if s >= dec!(75) => Self::VeryGood,
            s if s >= dec!(65) => Self::Good,
            s if s >= dec!(50) => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchLabel::Perfect => write!(f, "Perfect Match"),
            MatchLabel::Excellent => write!(f, "Excellent Match"),
            MatchLabel::VeryGood => write!(f, "Very Good Match"),
            MatchLabel::Good => write!(f, "Good Match"),
            MatchLabel::Fair => write!(f, "Fair Match"),
            MatchLabel::Poor => write!(f, "Poor Match"),
        }
    }
}
