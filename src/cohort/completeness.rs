//! Listing completeness ("data") score.
//!
//! Percentage of required fields populated, plus a bonus for highly valued
//! extras and for verification, minus penalties for specific missing fields.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::models::{AircraftRecord, VerificationStatus};
use crate::scoring::normalize::clamp_score;

const BONUS_CEILING: Decimal = dec!(20);
const MISSING_ENGINE_HOURS_PENALTY: Decimal = dec!(10);
const MISSING_INTERIOR_PENALTY: Decimal = dec!(5);
const MISSING_IMAGES_PENALTY: Decimal = dec!(10);

/// Breakdown of the data score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataScore {
    pub score: Decimal,
    pub required_filled: usize,
    pub required_total: usize,
    pub bonus_filled: usize,
    pub bonus_total: usize,
    pub verification_bonus: Decimal,
    pub penalties: Decimal,
}

/// Compute the completeness score of a listing.
pub fn data_score(record: &AircraftRecord) -> DataScore {
    let required = required_checklist(record);
    let bonus = bonus_checklist(record);

    let required_filled = required.iter().filter(|filled| **filled).count();
    let bonus_filled = bonus.iter().filter(|filled| **filled).count();

    let completeness = ratio(required_filled, required.len()) * dec!(100);
    let bonus_points = ratio(bonus_filled, bonus.len()) * BONUS_CEILING;

    let verification_bonus = match record.verification_status {
        VerificationStatus::Verified => dec!(20),
        VerificationStatus::Partial => dec!(10),
        VerificationStatus::Pending => Decimal::ZERO,
    };

    let mut penalties = Decimal::ZERO;
    if !number(record.engine_hours_since_new) {
        penalties += MISSING_ENGINE_HOURS_PENALTY;
    }
    if !record.interior_condition.is_rated() {
        penalties += MISSING_INTERIOR_PENALTY;
    }
    if record.images.iter().all(|i| i.trim().is_empty()) {
        penalties += MISSING_IMAGES_PENALTY;
    }

    DataScore {
        score: clamp_score(completeness + bonus_points + verification_bonus - penalties),
        required_filled,
        required_total: required.len(),
        bonus_filled,
        bonus_total: bonus.len(),
        verification_bonus,
        penalties,
    }
}

fn required_checklist(r: &AircraftRecord) -> [bool; 15] {
    [
        text(&r.title),
        text(&r.manufacturer),
        text(&r.model),
        r.year.is_some_and(|y| y != 0),
        number(r.price),
        text(&r.location),
        text(&r.description),
        number(r.airframe_total_time),
        text(&r.engine_manufacturer),
        text(&r.engine_model),
        number(r.engine_hours_since_new),
        number(r.engine_hours_since_overhaul),
        r.interior_condition.is_rated(),
        r.exterior_condition.is_rated(),
        r.last_annual_inspection_date.is_some(),
    ]
}

fn bonus_checklist(r: &AircraftRecord) -> [bool; 8] {
    [
        text(&r.serial_number),
        text(&r.registration),
        text(&r.avionics_description),
        text(&r.equipment_list),
        text(&r.maintenance_program),
        text(&r.damage_history),
        r.images.iter().any(|i| !i.trim().is_empty()),
        text(&r.specifications),
    ]
}

fn text(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(str::trim)
        .is_some_and(|v| !v.is_empty() && v != "0")
}

fn number(value: Option<Decimal>) -> bool {
    value.is_some_and(|v| !v.is_zero())
}

fn ratio(filled: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(filled) / Decimal::from(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Condition;
    use chrono::NaiveDate;

    fn complete_listing() -> AircraftRecord {
        AircraftRecord {
            id: "full".to_string(),
            title: Some("2015 Citation X".to_string()),
            manufacturer: Some("Cessna".to_string()),
            model: Some("Citation X".to_string()),
            year: Some(2015),
            price: Some(dec!(9500000)),
            location: Some("KTEB".to_string()),
            description: Some("One owner".to_string()),
            airframe_total_time: Some(dec!(3200)),
            engine_manufacturer: Some("Rolls-Royce".to_string()),
            engine_model: Some("AE3007C".to_string()),
            engine_hours_since_new: Some(dec!(3200)),
            engine_hours_since_overhaul: Some(dec!(400)),
            interior_condition: Condition::Excellent,
            exterior_condition: Condition::VeryGood,
            last_annual_inspection_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            images: vec!["front.jpg".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_required_fields() {
        let scored = data_score(&complete_listing());
        assert_eq!(scored.required_filled, 15);
        assert_eq!(scored.penalties, Decimal::ZERO);
        // 100 + 1/8 * 20, clamped
        assert_eq!(scored.score, dec!(100));
    }

    #[test]
    fn test_empty_listing_floors_at_zero() {
        let scored = data_score(&AircraftRecord::default());
        assert_eq!(scored.required_filled, 0);
        assert_eq!(scored.penalties, dec!(25));
        assert_eq!(scored.score, Decimal::ZERO);
    }

    #[test]
    fn test_verification_and_bonus() {
        let mut listing = AircraftRecord {
            id: "partial".to_string(),
            title: Some("Listing".to_string()),
            manufacturer: Some("Cessna".to_string()),
            model: Some("Citation X".to_string()),
            price: Some(dec!(1)),
            engine_hours_since_new: Some(dec!(100)),
            interior_condition: Condition::Good,
            serial_number: Some("750-0101".to_string()),
            registration: Some("N750X".to_string()),
            images: vec!["a.jpg".to_string()],
            ..Default::default()
        };
        // 6/15 required = 40, bonus 3/8 * 20 = 7.5
        assert_eq!(data_score(&listing).score, dec!(47.5));

        listing.verification_status = VerificationStatus::Verified;
        assert_eq!(data_score(&listing).score, dec!(67.5));

        listing.verification_status = VerificationStatus::Partial;
        assert_eq!(data_score(&listing).score, dec!(57.5));
    }

    #[test]
    fn test_zero_values_count_as_missing() {
        let mut listing = complete_listing();
        listing.images.clear();
        listing.engine_hours_since_new = Some(Decimal::ZERO);
        listing.location = Some("0".to_string());

        let scored = data_score(&listing);
        assert_eq!(scored.required_filled, 13);
        assert_eq!(scored.penalties, dec!(20));
    }
}
