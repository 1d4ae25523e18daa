//! Final recommendation score and the ranking pipeline.
//!
//! The final score is a fixed 50/50 blend of the value score and the buyer
//! priority score. Results are ordered by ascending final score.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::models::AircraftRecord;
use crate::deals::{self, DealInfo};
use crate::scoring::bounds::ScoringContext;
use crate::scoring::constraints::{Constraints, Rejection};
use crate::scoring::normalize::clamp_score;
use crate::scoring::priority::{priority_score, PriorityScore, PriorityWeights};
use crate::scoring::value::{value_score, ValueScore};

const VALUE_SHARE: Decimal = dec!(0.5);
const PRIORITY_SHARE: Decimal = dec!(0.5);

/// Discrete tier derived from the final score (lower is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueRating {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl ValueRating {
    pub fn from_final_score(score: Decimal) -> Self {
        if score <= dec!(20) {
            Self::Excellent
        } else if score <= dec!(40) {
            Self::VeryGood
        } else if score <= dec!(60) {
            Self::Good
        } else if score <= dec!(80) {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for ValueRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::VeryGood => write!(f, "Very Good"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// Scored output for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub record_id: String,
    pub final_score: Decimal,
    pub rating: ValueRating,
    pub value: ValueScore,
    pub priority: PriorityScore,
    pub deal: Option<DealInfo>,
}

/// Result of one ranking request.
#[derive(Debug, Clone, Serialize)]
pub struct RankingResult {
    pub total_available: usize,
    pub total_filtered: usize,
    pub recommendations: Vec<Recommendation>,
    pub rejected: Vec<Rejection>,
}

/// Blend value and priority scores into the final score.
pub fn combine(value: Decimal, priority: Decimal) -> Decimal {
    clamp_score(value * VALUE_SHARE + priority * PRIORITY_SHARE)
}

/// Score a single candidate. `ctx` must be built from the set being ranked.
pub fn score_candidate(
    record: &AircraftRecord,
    weights: &PriorityWeights,
    ctx: &ScoringContext<'_>,
) -> Recommendation {
    let value = value_score(record);
    let priority = priority_score(record, weights, ctx);
    let final_score = combine(value.score, priority.score);

    Recommendation {
        record_id: record.id.clone(),
        final_score,
        rating: ValueRating::from_final_score(final_score),
        value,
        priority,
        deal: None,
    }
}

/// Score every candidate of one ranking pass, in input order.
///
/// `ctx` must have been built from exactly `candidates`: a context over a
/// wider set would stretch the bounds and skew every normalized score.
pub fn score_candidates(
    candidates: &[&AircraftRecord],
    weights: &PriorityWeights,
    ctx: &ScoringContext<'_>,
) -> Vec<Recommendation> {
    debug_assert!(
        ctx.matches(candidates),
        "scoring context was built from a different candidate set"
    );
    candidates
        .iter()
        .map(|record| score_candidate(record, weights, ctx))
        .collect()
}

/// Filter, score and order a catalog for one buyer request.
///
/// Bounds and deal medians are both computed over the filtered candidate set;
/// the context is dropped when this returns.
#[instrument(skip_all, fields(catalog = catalog.len(), weights = ?weights))]
pub fn rank(
    catalog: &[AircraftRecord],
    constraints: &Constraints,
    weights: &PriorityWeights,
) -> RankingResult {
    let outcome = constraints.apply(catalog);
    let candidates = outcome.accepted;
    let ctx = ScoringContext::new(&candidates);

    let deals = deals::annotate(ctx.records(), ctx.records());

    let mut recommendations = score_candidates(ctx.records(), weights, &ctx);
    for (rec, deal) in recommendations.iter_mut().zip(deals) {
        rec.deal = Some(deal);
    }

    recommendations.sort_by(|a, b| {
        a.final_score
            .cmp(&b.final_score)
            .then_with(|| a.record_id.cmp(&b.record_id))
    });

    info!(
        filtered = candidates.len(),
        rejected = outcome.rejected.len(),
        "Ranking complete"
    );

    RankingResult {
        total_available: catalog.len(),
        total_filtered: candidates.len(),
        recommendations,
        rejected: outcome.rejected,
    }
}
