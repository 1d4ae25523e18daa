//! Upgrade-signal detection from listing text.
//!
//! Each signal is an ordered keyword table; a signal fires when any of its
//! keywords appears. Avionics signals are tiered and only the best tier is
//! reported.

use crate::catalog::models::AircraftRecord;

const INTERIOR_CUES: &[&str] = &[
    "new interior",
    "refurb",
    "interior redone",
    "vvi",
    "vip interior",
];

const PAINT_CUES: &[&str] = &["new paint", "repaint", "fresh paint"];

/// Avionics tiers, best first.
const AVIONICS_TIERS: &[(&str, &[&str])] = &[
    (
        "Superior avionics suite",
        &[
            "g5000",
            "g3000",
            "pro line fusion",
            "symmetry flight deck",
            "easy iii",
            "ace avionics",
        ],
    ),
    (
        "Modern avionics",
        &["pro line 21", "g1000", "perspective", "avidyne r9"],
    ),
];

/// Upgrade highlights for a record, in a fixed order: interior, paint, avionics.
pub fn detect_upgrade_highlights(record: &AircraftRecord) -> Vec<&'static str> {
    let description = record.description.as_deref().unwrap_or_default().to_lowercase();
    let avionics = record
        .avionics_description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let mut highlights = Vec::new();

    if contains_any(&description, INTERIOR_CUES) {
        highlights.push("Recent interior refurbishment");
    }
    if contains_any(&description, PAINT_CUES) {
        highlights.push("Recent exterior paint");
    }

    let avionics_tier = AVIONICS_TIERS.iter().find(|(_, keywords)| {
        contains_any(&avionics, keywords) || contains_any(&description, keywords)
    });
    if let Some((label, _)) = avionics_tier {
        highlights.push(*label);
    }

    highlights
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}
