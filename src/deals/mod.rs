//! Deal intelligence.
//!
//! Compares each listing's price with the median price of its market segment and
//! flags upgrade signals found in the listing text.

pub mod highlights;
pub mod pricing;

use serde::Serialize;

use crate::catalog::category::{infer_category, AircraftCategory};
use crate::catalog::models::AircraftRecord;

pub use highlights::detect_upgrade_highlights;
pub use pricing::{category_medians, classify_price, RelativePrice, ValueTag};

/// Deal annotation attached to a single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealInfo {
    pub record_id: String,
    pub category: AircraftCategory,
    pub is_upgraded: bool,
    pub highlights: Vec<String>,
    pub value_tag: ValueTag,
    pub relative_price: RelativePrice,
}

/// Annotate `records`, using medians computed over `reference`.
///
/// Ranking passes use the filtered candidate set for both arguments.
pub fn annotate(records: &[&AircraftRecord], reference: &[&AircraftRecord]) -> Vec<DealInfo> {
    let medians = category_medians(reference);

    records
        .iter()
        .map(|record| {
            let category = infer_category(record);
            let value_tag = classify_price(record.price, medians.get(&category).copied());
            let highlights = detect_upgrade_highlights(record);

            DealInfo {
                record_id: record.id.clone(),
                category,
                is_upgraded: !highlights.is_empty(),
                highlights: highlights.into_iter().map(str::to_string).collect(),
                relative_price: value_tag.relative_price(),
                value_tag,
            }
        })
        .collect()
}
