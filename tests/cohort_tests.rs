//! Integration tests for cohort scoring.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use aircraft_ranker::catalog::loader::load_catalog;
use aircraft_ranker::catalog::models::{AircraftRecord, Condition, VerificationStatus};
use aircraft_ranker::cohort::completeness::data_score;
use aircraft_ranker::cohort::matching::{BuyerPreferenceProfile, MatchLabel};
use aircraft_ranker::cohort::tables::{EngineTboTable, ModelWeightTable, ResaleWeights};
use aircraft_ranker::cohort::{score_catalog, CohortSettings};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn citation(id: &str, engine_hours: Decimal) -> AircraftRecord {
    AircraftRecord {
        id: id.to_string(),
        manufacturer: Some("Cessna".to_string()),
        model: Some("Citation X".to_string()),
        engine_model: Some("AE3007C".to_string()),
        engine_hours_since_new: Some(engine_hours),
        ..Default::default()
    }
}

fn full_listing() -> AircraftRecord {
    AircraftRecord {
        id: "full".to_string(),
        title: Some("2014 Citation X".to_string()),
        manufacturer: Some("Cessna".to_string()),
        model: Some("Citation X".to_string()),
        year: Some(2014),
        price: Some(dec!(9000000)),
        location: Some("KTEB".to_string()),
        description: Some("Well kept".to_string()),
        airframe_total_time: Some(dec!(3000)),
        engine_manufacturer: Some("Rolls-Royce".to_string()),
        engine_model: Some("AE3007C".to_string()),
        engine_hours_since_new: Some(dec!(3000)),
        engine_hours_since_overhaul: Some(dec!(200)),
        interior_condition: Condition::VeryGood,
        exterior_condition: Condition::Good,
        last_annual_inspection_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        verification_status: VerificationStatus::Pending,
        ..Default::default()
    }
}

// ──────────────────────────────────────────
// Priority score
// ──────────────────────────────────────────

#[test]
fn engine_percentiles_are_evenly_spaced() {
    let records: Vec<AircraftRecord> = [dec!(5500), dec!(1000), dec!(4200), dec!(300), dec!(2600)]
        .into_iter()
        .enumerate()
        .map(|(i, hours)| citation(&format!("cx-{i}"), hours))
        .collect();

    let scores = score_catalog(&records, None, &CohortSettings::default(), as_of());
    let engine: BTreeSet<Decimal> = scores.iter().map(|s| s.components.engine_hours).collect();

    let expected: BTreeSet<Decimal> =
        [dec!(0), dec!(25), dec!(50), dec!(75), dec!(100)].into_iter().collect();
    assert_eq!(engine, expected);
}

#[test]
fn every_cohort_has_a_best_of_100() {
    let mut records = vec![
        citation("cx-a", dec!(1000)),
        citation("cx-b", dec!(3000)),
        citation("cx-c", dec!(5000)),
    ];
    records.push(AircraftRecord {
        id: "p300".to_string(),
        manufacturer: Some("Embraer".to_string()),
        model: Some("Phenom 300".to_string()),
        engine_hours_since_new: Some(dec!(1200)),
        ..Default::default()
    });

    let scores = score_catalog(&records, None, &CohortSettings::default(), as_of());

    let mut best: BTreeMap<String, Decimal> = BTreeMap::new();
    for score in &scores {
        let entry = best.entry(score.cohort.clone()).or_insert(Decimal::ZERO);
        *entry = (*entry).max(score.priority_score);
        assert!(score.priority_score >= Decimal::ZERO && score.priority_score <= dec!(100));
    }
    assert_eq!(best.len(), 2);
    assert!(best.values().all(|b| *b == dec!(100)));

    let phenom = scores.iter().find(|s| s.record_id == "p300").unwrap();
    assert_eq!(phenom.cohort_size, 1);
    assert_eq!(phenom.position, 1);
    assert_eq!(phenom.percentile, dec!(100));
}

#[test]
fn model_weights_come_from_settings() {
    let records = vec![citation("cx-a", dec!(1000)), citation("cx-b", dec!(3000))];

    let scores = score_catalog(&records, None, &CohortSettings::default(), as_of());
    assert!(scores.iter().all(|s| s.weights.engine == dec!(0.35)));

    let mut overrides = BTreeMap::new();
    overrides.insert(
        "Cessna Citation X".to_string(),
        ResaleWeights {
            engine: dec!(0.5),
            interior: dec!(0.2),
            avionics: dec!(0.1),
            maintenance: dec!(0.1),
            paint: dec!(0.1),
        },
    );
    let settings = CohortSettings {
        engine_tbo: EngineTboTable::default(),
        model_weights: ModelWeightTable::with_overrides(&overrides),
    };
    let scores = score_catalog(&records, None, &settings, as_of());
    assert!(scores.iter().all(|s| s.weights.engine == dec!(0.5)));
}

#[test]
fn scoring_is_repeatable() {
    let catalog = load_catalog(Path::new("data/sample_catalog.json")).expect("sample should load");
    let settings = CohortSettings::default();

    let first = score_catalog(&catalog, None, &settings, as_of());
    let second = score_catalog(&catalog, None, &settings, as_of());

    let summary = |scores: &[aircraft_ranker::cohort::CohortScore]| -> Vec<(String, Decimal, Decimal, usize)> {
        scores
            .iter()
            .map(|s| (s.record_id.clone(), s.priority_score, s.data_score, s.position))
            .collect()
    };
    assert_eq!(summary(&first), summary(&second));
    assert_eq!(first.len(), catalog.len());
}

// ──────────────────────────────────────────
// Data score
// ──────────────────────────────────────────

#[test]
fn removing_a_field_never_raises_data_score() {
    let full = full_listing();
    let baseline = data_score(&full).score;

    let removals: [fn(&mut AircraftRecord); 15] = [
        |r| r.title = None,
        |r| r.manufacturer = None,
        |r| r.model = None,
        |r| r.year = None,
        |r| r.price = None,
        |r| r.location = None,
        |r| r.description = None,
        |r| r.airframe_total_time = None,
        |r| r.engine_manufacturer = None,
        |r| r.engine_model = None,
        |r| r.engine_hours_since_new = None,
        |r| r.engine_hours_since_overhaul = None,
        |r| r.interior_condition = Condition::Unrated,
        |r| r.exterior_condition = Condition::Unrated,
        |r| r.last_annual_inspection_date = None,
    ];

    for remove in removals {
        let mut degraded = full.clone();
        remove(&mut degraded);
        let score = data_score(&degraded).score;
        assert!(score < baseline, "dropping a required field should lower the score");
    }
}

#[test]
fn verification_raises_data_score() {
    let mut listing = full_listing();
    listing.title = None;
    listing.description = None;
    listing.location = None;
    listing.images = vec!["cabin.jpg".to_string()];
    let pending = data_score(&listing).score;

    listing.verification_status = VerificationStatus::Partial;
    let partial = data_score(&listing).score;
    listing.verification_status = VerificationStatus::Verified;
    let verified = data_score(&listing).score;

    assert!(pending < partial && partial < verified);
    assert!(verified <= dec!(100));
}

// ──────────────────────────────────────────
// Match score
// ──────────────────────────────────────────

#[test]
fn no_profile_is_perfect_match() {
    let records = vec![citation("cx-a", dec!(1000))];
    let scores = score_catalog(&records, None, &CohortSettings::default(), as_of());
    assert_eq!(scores[0].match_score, dec!(100));
    assert_eq!(scores[0].match_label, MatchLabel::Perfect);
}

#[test]
fn profile_separates_listings() {
    let mut fresh = citation("fresh", dec!(500));
    fresh.airframe_total_time = Some(dec!(500));
    fresh.avionics_description = Some("Garmin G5000".to_string());
    fresh.interior_condition = Condition::Excellent;
    fresh.exterior_condition = Condition::Excellent;
    fresh.last_annual_inspection_date = NaiveDate::from_ymd_opt(2026, 4, 1);

    let mut tired = citation("tired", dec!(5800));
    tired.airframe_total_time = Some(dec!(11000));
    tired.avionics_description = Some("Honeywell Primus 2000".to_string());
    tired.interior_condition = Condition::Poor;
    tired.exterior_condition = Condition::Fair;

    let profile = BuyerPreferenceProfile {
        max_total_hours: Some(dec!(6000)),
        min_engine_hours_remaining: Some(dec!(2000)),
        preferred_avionics: Some("g5000".to_string()),
        min_interior_rating: Some(Condition::VeryGood),
        min_paint_rating: Some(Condition::Good),
        max_inspection_age_months: Some(dec!(12)),
        ..Default::default()
    };

    let records = vec![fresh, tired];
    let scores = score_catalog(&records, Some(&profile), &CohortSettings::default(), as_of());
    let fresh = scores.iter().find(|s| s.record_id == "fresh").unwrap();
    let tired = scores.iter().find(|s| s.record_id == "tired").unwrap();

    // Hours under the cap still cost a little: 500 of 6,000 scores 98.3.
    assert!(fresh.match_score > dec!(99));
    assert_eq!(fresh.match_label, MatchLabel::Perfect);
    assert!(tired.match_score < dec!(50));
    assert_eq!(tired.match_label, MatchLabel::Poor);
}

#[test]
fn sample_preferences_parse() {
    let contents = std::fs::read_to_string("data/sample_preferences.json").unwrap();
    let profile: BuyerPreferenceProfile = serde_json::from_str(&contents).unwrap();
    assert_eq!(profile.min_interior_rating, Some(Condition::VeryGood));
    assert_eq!(profile.preferred_avionics.as_deref(), Some("g3000"));
    assert_eq!(profile.weights.engine, dec!(2));
}
