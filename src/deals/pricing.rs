//! Segment median prices and price classification.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::category::{infer_category, AircraftCategory};
use crate::catalog::models::AircraftRecord;

const GREAT_DEAL_RATIO: Decimal = dec!(0.85);
const FAIR_VALUE_RATIO: Decimal = dec!(1.05);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueTag {
    #[serde(rename = "Great Deal")]
    GreatDeal,
    #[serde(rename = "Fair Value")]
    FairValue,
    Premium,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelativePrice {
    #[serde(rename = "Below Market")]
    BelowMarket,
    #[serde(rename = "At Market")]
    AtMarket,
    #[serde(rename = "Above Market")]
    AboveMarket,
    Unknown,
}

impl ValueTag {
    pub fn relative_price(self) -> RelativePrice {
        match self {
            Self::GreatDeal => RelativePrice::BelowMarket,
            Self::FairValue => RelativePrice::AtMarket,
            Self::Premium => RelativePrice::AboveMarket,
            Self::Unknown => RelativePrice::Unknown,
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GreatDeal => write!(f, "Great Deal"),
            Self::FairValue => write!(f, "Fair Value"),
            Self::Premium => write!(f, "Premium"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Median price per inferred segment, ignoring non-positive and missing prices.
pub fn category_medians(records: &[&AircraftRecord]) -> BTreeMap<AircraftCategory, Decimal> {
    let mut buckets: BTreeMap<AircraftCategory, Vec<Decimal>> = BTreeMap::new();

    for record in records {
        let Some(price) = record.price.filter(|p| *p > Decimal::ZERO) else {
            continue;
        };
        buckets.entry(infer_category(record)).or_default().push(price);
    }

    buckets
        .into_iter()
        .filter_map(|(category, mut prices)| median(&mut prices).map(|m| (category, m)))
        .collect()
}

/// Median of `values`; the mean of the two middle values for even counts.
pub fn median(values: &mut [Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    values.sort();

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        let (low, high) = (values[mid - 1], values[mid]);
        Some(
            low.checked_add(high)
                .map_or_else(|| low + (high - low) / dec!(2), |sum| sum / dec!(2)),
        )
    } else {
        Some(values[mid])
    }
}

/// Classify a price against its segment median.
pub fn classify_price(price: Option<Decimal>, median: Option<Decimal>) -> ValueTag {
    let (Some(price), Some(median)) = (price, median) else {
        return ValueTag::Unknown;
    };
    if price <= Decimal::ZERO || median <= Decimal::ZERO {
        return ValueTag::Unknown;
    }

    // A quotient too large to represent is far above any threshold.
    let Some(ratio) = price.checked_div(median) else {
        return ValueTag::Premium;
    };
    if ratio <= GREAT_DEAL_RATIO {
        ValueTag::GreatDeal
    } else if ratio <= FAIR_VALUE_RATIO {
        ValueTag::FairValue
    } else {
        ValueTag::Premium
    }
}
