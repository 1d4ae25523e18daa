//! Static lookup tables for cohort scoring.
//!
//! Engine overhaul intervals, resale weight sets and avionics tiers. The engine
//! and weight tables can be extended from configuration; the built-in entries
//! are the defaults.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Overhaul interval assumed for engine models missing from the table.
pub const DEFAULT_TBO_HOURS: Decimal = dec!(4000);

const BUILTIN_TBO_HOURS: &[(&str, Decimal)] = &[
    ("pt6a-42", dec!(3500)),
    ("pt6a-67", dec!(3500)),
    ("pw306c", dec!(5000)),
    ("pw307a", dec!(5000)),
    ("cf34-3a", dec!(6000)),
    ("br710-c4-11", dec!(6000)),
    ("tfe731-2", dec!(3000)),
    ("tfe731-3", dec!(3500)),
    ("tfe731-40", dec!(4000)),
    ("tfe731-60", dec!(4000)),
    ("jt15d-4", dec!(3000)),
    ("jt15d-5", dec!(3500)),
    ("ae3007c", dec!(6000)),
    ("cf700-2d2", dec!(3000)),
    ("htf7000", dec!(4000)),
    ("htf7500e", dec!(5000)),
    ("pw545c", dec!(4000)),
    ("pw610f", dec!(5000)),
    ("rolls royce pearl 15", dec!(6000)),
    ("ge passport", dec!(6000)),
];

/// Engine model → time between overhaul, in hours.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTboTable {
    hours: BTreeMap<String, Decimal>,
}

impl Default for EngineTboTable {
    fn default() -> Self {
        Self {
            hours: BUILTIN_TBO_HOURS
                .iter()
                .map(|(model, hours)| (model.to_string(), *hours))
                .collect(),
        }
    }
}

impl EngineTboTable {
    /// Built-in table with `overrides` added or replacing entries.
    pub fn with_overrides(overrides: &BTreeMap<String, Decimal>) -> Self {
        let mut table = Self::default();
        for (model, hours) in overrides {
            if *hours > Decimal::ZERO {
                table.hours.insert(normalize_key(model), *hours);
            }
        }
        table
    }

    /// Interval for `engine_model`, falling back to 4,000 hours.
    pub fn interval(&self, engine_model: Option<&str>) -> Decimal {
        engine_model
            .and_then(|m| self.hours.get(&normalize_key(m)))
            .copied()
            .unwrap_or(DEFAULT_TBO_HOURS)
    }
}

/// Weights of the five condition components in the cohort priority score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResaleWeights {
    pub engine: Decimal,
    pub interior: Decimal,
    pub avionics: Decimal,
    pub maintenance: Decimal,
    pub paint: Decimal,
}

impl Default for ResaleWeights {
    fn default() -> Self {
        Self {
            engine: dec!(0.30),
            interior: dec!(0.25),
            avionics: dec!(0.20),
            maintenance: dec!(0.15),
            paint: dec!(0.10),
        }
    }
}

impl ResaleWeights {
    pub fn sum(&self) -> Decimal {
        self.engine + self.interior + self.avionics + self.maintenance + self.paint
    }
}

/// Model-specific resale weights, keyed by lowercase "manufacturer model" or
/// by model alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWeightTable {
    by_model: BTreeMap<String, ResaleWeights>,
}

impl Default for ModelWeightTable {
    fn default() -> Self {
        let mut by_model = BTreeMap::new();
        by_model.insert(
            "citation x".to_string(),
            ResaleWeights {
                engine: dec!(0.35),
                interior: dec!(0.20),
                avionics: dec!(0.25),
                maintenance: dec!(0.15),
                paint: dec!(0.05),
            },
        );
        by_model.insert(
            "gulfstream g550".to_string(),
            ResaleWeights {
                engine: dec!(0.25),
                interior: dec!(0.30),
                avionics: dec!(0.25),
                maintenance: dec!(0.15),
                paint: dec!(0.05),
            },
        );
        Self { by_model }
    }
}

impl ModelWeightTable {
    pub fn with_overrides(overrides: &BTreeMap<String, ResaleWeights>) -> Self {
        let mut table = Self::default();
        for (model, weights) in overrides {
            table.by_model.insert(normalize_key(model), *weights);
        }
        table
    }

    /// Weights for a manufacturer/model pair; the full pair takes precedence
    /// over the model name alone.
    pub fn lookup(&self, manufacturer: Option<&str>, model: Option<&str>) -> ResaleWeights {
        let model = model.map(normalize_key).unwrap_or_default();
        let full = normalize_key(&format!(
            "{} {}",
            manufacturer.unwrap_or_default(),
            model
        ));

        self.by_model
            .get(&full)
            .or_else(|| self.by_model.get(&model))
            .copied()
            .unwrap_or_default()
    }
}

/// Avionics suites ranked by sophistication; the best matching entry wins.
pub const AVIONICS_TIERS: &[(&str, u32)] = &[
    ("g5000", 100),
    ("g3000", 95),
    ("pro line fusion", 90),
    ("symmetry flight deck", 85),
    ("easy iii", 80),
    ("ace avionics", 75),
    ("pro line 21", 70),
    ("g1000", 65),
    ("perspective", 60),
    ("avidyne r9", 55),
    ("collins proline", 50),
    ("honeywell", 45),
    ("garmin", 40),
    ("bendix king", 35),
    ("basic", 20),
];

/// Avionics families used for partial buyer-preference credit.
pub const AVIONICS_FAMILIES: &[(&str, &[&str])] = &[
    ("garmin", &["g5000", "g3000", "g1000", "perspective"]),
    ("collins", &["pro line fusion", "pro line 21"]),
    ("honeywell", &["symmetry", "easy iii", "ace"]),
];

/// Tier (0..=100) of an avionics description; 0 when nothing matches.
pub fn avionics_tier(description: Option<&str>) -> u32 {
    let text = description.unwrap_or_default().to_lowercase();
    AVIONICS_TIERS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, tier)| *tier)
        .max()
        .unwrap_or(0)
}

fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
