//! Market-segment inference for aircraft records.
//!
//! Buckets a record into Turboprop / Light Jet / Midsize Jet / Heavy Jet from
//! its price, passenger count and model name. Deal intelligence uses the bucket
//! as the peer group for median-price comparisons.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::models::AircraftRecord;

const LIGHT_PRICE_CEILING: Decimal = dec!(10000000);
const MIDSIZE_PRICE_CEILING: Decimal = dec!(40000000);
const LIGHT_MAX_PASSENGERS: u32 = 8;
const MIDSIZE_MAX_PASSENGERS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AircraftCategory {
    Turboprop,
    #[serde(rename = "Light Jet")]
    LightJet,
    #[serde(rename = "Midsize Jet")]
    MidsizeJet,
    #[serde(rename = "Heavy Jet")]
    HeavyJet,
}

impl fmt::Display for AircraftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turboprop => write!(f, "Turboprop"),
            Self::LightJet => write!(f, "Light Jet"),
            Self::MidsizeJet => write!(f, "Midsize Jet"),
            Self::HeavyJet => write!(f, "Heavy Jet"),
        }
    }
}

/// Infer the market segment of a record.
///
/// Missing price or passenger values count as zero, which lands the record in
/// the light segment.
pub fn infer_category(record: &AircraftRecord) -> AircraftCategory {
    let price = record.price.unwrap_or(Decimal::ZERO);
    let passengers = record.passengers.unwrap_or(0);

    if price < LIGHT_PRICE_CEILING || passengers <= LIGHT_MAX_PASSENGERS {
        if is_propeller(record) {
            return AircraftCategory::Turboprop;
        }
        return AircraftCategory::LightJet;
    }

    if price < MIDSIZE_PRICE_CEILING || passengers <= MIDSIZE_MAX_PASSENGERS {
        return AircraftCategory::MidsizeJet;
    }

    AircraftCategory::HeavyJet
}

/// Propeller aircraft: the model name says so, or the listing is single-engine.
fn is_propeller(record: &AircraftRecord) -> bool {
    let model = record.model.as_deref().unwrap_or_default().to_lowercase();
    model.contains("prop") || record.multi_engine == Some(false)
}
