//! Cohort scoring: compare listings of the same aircraft type.
//!
//! Records are grouped by manufacturer and model on every call. Within each
//! group every record receives three independent 0..=100 scores:
//!
//! - **priority**: condition components ranked by percentile within the cohort,
//!   weighted, then rescaled so the best member scores exactly 100
//! - **data**: completeness of the listing itself
//! - **match**: fit against an optional buyer preference profile

pub mod completeness;
pub mod components;
pub mod matching;
pub mod percentile;
pub mod tables;

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::catalog::models::AircraftRecord;
use crate::scoring::normalize::{clamp_score, SCORE_MAX};

pub use completeness::{data_score, DataScore};
pub use components::{rank_components, ComponentReadings, ComponentScores};
pub use matching::{match_score, BuyerPreferenceProfile, MatchBreakdown, MatchLabel, MatchWeights};
pub use percentile::percentile_rank;
pub use tables::{EngineTboTable, ModelWeightTable, ResaleWeights};

/// Grouping key: normalized manufacturer and model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CohortKey {
    manufacturer: String,
    model: String,
}

impl CohortKey {
    pub fn of(record: &AircraftRecord) -> Self {
        Self {
            manufacturer: normalize(record.manufacturer.as_deref()),
            model: normalize(record.model.as_deref()),
        }
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.manufacturer.is_empty(), self.model.is_empty()) {
            (true, true) => write!(f, "unknown"),
            (false, true) => write!(f, "{}", self.manufacturer),
            (true, false) => write!(f, "{}", self.model),
            (false, false) => write!(f, "{} {}", self.manufacturer, self.model),
        }
    }
}

fn normalize(raw: Option<&str>) -> String {
    raw.unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lookup tables used by the cohort scorer.
#[derive(Debug, Clone, Default)]
pub struct CohortSettings {
    pub engine_tbo: EngineTboTable,
    pub model_weights: ModelWeightTable,
}

/// Scores for one record relative to its cohort.
#[derive(Debug, Clone, Serialize)]
pub struct CohortScore {
    pub record_id: String,
    pub cohort: String,
    pub priority_score: Decimal,
    pub data_score: Decimal,
    pub match_score: Decimal,
    pub match_label: MatchLabel,
    pub components: ComponentScores,
    pub weights: ResaleWeights,
    pub data: DataScore,
    pub matching: MatchBreakdown,
    /// 1 is the highest priority score in the cohort.
    pub position: usize,
    pub cohort_size: usize,
    pub best_in_cohort: Decimal,
    pub percentile: Decimal,
}

/// Group `records` into cohorts, keyed and ordered by `CohortKey`.
pub fn group_cohorts<'a>(records: &'a [AircraftRecord]) -> BTreeMap<CohortKey, Vec<&'a AircraftRecord>> {
    let mut groups: BTreeMap<CohortKey, Vec<&AircraftRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(CohortKey::of(record)).or_default().push(record);
    }
    groups
}

/// Score every member of one cohort. Output follows the input order.
pub fn score_cohort(
    members: &[&AircraftRecord],
    profile: &BuyerPreferenceProfile,
    settings: &CohortSettings,
    as_of: NaiveDate,
) -> Vec<CohortScore> {
    let Some(first) = members.first() else {
        return Vec::new();
    };
    let key = CohortKey::of(first);
    debug_assert!(
        members.iter().all(|r| CohortKey::of(r) == key),
        "cohort members must share manufacturer and model"
    );

    let weights = settings
        .model_weights
        .lookup(first.manufacturer.as_deref(), first.model.as_deref());

    let readings: Vec<ComponentReadings> = members
        .iter()
        .map(|r| ComponentReadings::from_record(r, &settings.engine_tbo, as_of))
        .collect();
    let components = rank_components(&readings);

    let composites: Vec<Decimal> = components.iter().map(|c| c.composite(&weights)).collect();
    let best_composite = composites.iter().copied().max().unwrap_or(Decimal::ZERO);
    if best_composite <= Decimal::ZERO {
        debug!(cohort = %key, "no positive composite in cohort, priority scores are 0");
    }

    let priorities: Vec<Decimal> = composites
        .iter()
        .map(|c| rescale_to_best(*c, best_composite))
        .collect();
    let positions = positions_by_priority(members, &priorities);
    let best_in_cohort = priorities.iter().copied().max().unwrap_or(Decimal::ZERO);
    let cohort_size = members.len();

    members
        .iter()
        .zip(components)
        .zip(priorities.iter().zip(positions))
        .map(|((record, components), (priority, position))| {
            let data = data_score(record);
            let matching = match_score(record, profile, &settings.engine_tbo, as_of);

            CohortScore {
                record_id: record.id.clone(),
                cohort: key.to_string(),
                priority_score: *priority,
                data_score: data.score,
                match_score: matching.score,
                match_label: MatchLabel::from_score(matching.score),
                components,
                weights,
                data,
                matching,
                position,
                cohort_size,
                best_in_cohort,
                percentile: positional_percentile(position, cohort_size),
            }
        })
        .collect()
}

/// Score the whole catalog cohort by cohort. Sorted by priority score
/// descending, ties by record id.
#[instrument(skip_all, fields(catalog = records.len(), has_profile = profile.is_some()))]
pub fn score_catalog(
    records: &[AircraftRecord],
    profile: Option<&BuyerPreferenceProfile>,
    settings: &CohortSettings,
    as_of: NaiveDate,
) -> Vec<CohortScore> {
    let empty = BuyerPreferenceProfile::default();
    let profile = profile.unwrap_or(&empty);

    let groups = group_cohorts(records);
    let cohorts = groups.len();

    let mut scores: Vec<CohortScore> = groups
        .values()
        .flat_map(|members| score_cohort(members, profile, settings, as_of))
        .collect();

    scores.sort_by(|a, b| {
        b.priority_score
            .cmp(&a.priority_score)
            .then_with(|| a.record_id.cmp(&b.record_id))
    });

    info!(cohorts, scored = scores.len(), "cohort scoring complete");
    scores
}

fn rescale_to_best(composite: Decimal, best: Decimal) -> Decimal {
    if best <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    clamp_score(composite / best * SCORE_MAX)
}

/// 1-based rank of each member by priority, highest first; ties by record id.
fn positions_by_priority(members: &[&AircraftRecord], priorities: &[Decimal]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..members.len()).collect();
    order.sort_by(|a, b| {
        priorities[*b]
            .cmp(&priorities[*a])
            .then_with(|| members[*a].id.cmp(&members[*b].id))
    });

    let mut positions = vec![0; members.len()];
    for (rank, index) in order.into_iter().enumerate() {
        positions[index] = rank + 1;
    }
    positions
}

/// `(1 - (position - 1) / size) * 100`; a singleton cohort is 100.
pub fn positional_percentile(position: usize, cohort_size: usize) -> Decimal {
    if cohort_size <= 1 {
        return SCORE_MAX;
    }
    let behind = Decimal::from(position.saturating_sub(1)) / Decimal::from(cohort_size);
    (dec!(1) - behind) * SCORE_MAX
}
