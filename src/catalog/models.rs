use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One aircraft (or aircraft listing) as supplied by the catalog loader.
///
/// Every field except `id` is optional; the scorers treat an absent value as
/// unknown rather than as a zero reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftRecord {
    pub id: String,
    pub title: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub year: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub registration: Option<String>,

    // Performance and cost
    pub price: Option<Decimal>,
    pub range: Option<Decimal>,
    pub speed: Option<Decimal>,
    #[serde(default, deserialize_with = "whole_number")]
    pub passengers: Option<u32>,
    pub max_altitude: Option<Decimal>,
    pub runway_length: Option<Decimal>,
    pub cabin_volume: Option<Decimal>,
    pub total_hourly_cost: Option<Decimal>,
    pub hourly_variable_cost: Option<Decimal>,
    pub cost_per_mile: Option<Decimal>,
    pub depreciation_rate: Option<Decimal>,

    // Manufacturer-published performance per dollar
    pub speed_per_dollar: Option<Decimal>,
    pub range_per_dollar: Option<Decimal>,
    pub performance_per_dollar: Option<Decimal>,
    pub efficiency_per_dollar: Option<Decimal>,
    pub all_around_per_dollar: Option<Decimal>,

    // Airframe and engine
    pub airframe_total_time: Option<Decimal>,
    pub multi_engine: Option<bool>,
    pub engine_manufacturer: Option<String>,
    pub engine_model: Option<String>,
    pub engine_hours_since_new: Option<Decimal>,
    pub engine_hours_since_overhaul: Option<Decimal>,

    // Condition
    pub interior_condition: Condition,
    pub exterior_condition: Condition,
    pub avionics_description: Option<String>,
    pub last_annual_inspection_date: Option<NaiveDate>,

    // Listing extras
    pub equipment_list: Option<String>,
    pub maintenance_program: Option<String>,
    pub damage_history: Option<String>,
    pub images: Vec<String>,
    pub specifications: Option<String>,
    pub verification_status: VerificationStatus,
}

impl AircraftRecord {
    /// Raw value of a rankable metric, if the listing carries one.
    pub fn metric(&self, metric: Metric) -> Option<Decimal> {
        match metric {
            Metric::Price => self.price,
            Metric::Range => self.range,
            Metric::Speed => self.speed,
            Metric::Passengers => self.passengers.map(Decimal::from),
            Metric::MaxAltitude => self.max_altitude,
            Metric::RunwayLength => self.runway_length,
            Metric::CabinVolume => self.cabin_volume,
            Metric::TotalHourlyCost => self.total_hourly_cost,
            Metric::HourlyVariableCost => self.hourly_variable_cost,
            Metric::CostPerMile => self.cost_per_mile,
            Metric::DepreciationRate => self.depreciation_rate,
            Metric::SpeedPerDollar => self.speed_per_dollar,
            Metric::RangePerDollar => self.range_per_dollar,
            Metric::PerformancePerDollar => self.performance_per_dollar,
            Metric::EfficiencyPerDollar => self.efficiency_per_dollar,
            Metric::AllAroundPerDollar => self.all_around_per_dollar,
        }
    }
}

/// Numeric fields that buyers can weight in a priority ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Price,
    Range,
    Speed,
    Passengers,
    MaxAltitude,
    RunwayLength,
    CabinVolume,
    TotalHourlyCost,
    HourlyVariableCost,
    CostPerMile,
    DepreciationRate,
    SpeedPerDollar,
    RangePerDollar,
    PerformancePerDollar,
    EfficiencyPerDollar,
    AllAroundPerDollar,
}

/// Whether a larger raw value is preferable for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Metric {
    pub const ALL: [Metric; 16] = [
        Metric::Price,
        Metric::Range,
        Metric::Speed,
        Metric::Passengers,
        Metric::MaxAltitude,
        Metric::RunwayLength,
        Metric::CabinVolume,
        Metric::TotalHourlyCost,
        Metric::HourlyVariableCost,
        Metric::CostPerMile,
        Metric::DepreciationRate,
        Metric::SpeedPerDollar,
        Metric::RangePerDollar,
        Metric::PerformancePerDollar,
        Metric::EfficiencyPerDollar,
        Metric::AllAroundPerDollar,
    ];

    /// The five per-dollar metrics averaged by the value score.
    pub const PER_DOLLAR: [Metric; 5] = [
        Metric::SpeedPerDollar,
        Metric::RangePerDollar,
        Metric::PerformancePerDollar,
        Metric::EfficiencyPerDollar,
        Metric::AllAroundPerDollar,
    ];

    pub fn direction(self) -> Direction {
        match self {
            Metric::Price
            | Metric::TotalHourlyCost
            | Metric::HourlyVariableCost
            | Metric::CostPerMile
            | Metric::RunwayLength
            | Metric::DepreciationRate => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::Range => "range",
            Metric::Speed => "speed",
            Metric::Passengers => "passengers",
            Metric::MaxAltitude => "max_altitude",
            Metric::RunwayLength => "runway_length",
            Metric::CabinVolume => "cabin_volume",
            Metric::TotalHourlyCost => "total_hourly_cost",
            Metric::HourlyVariableCost => "hourly_variable_cost",
            Metric::CostPerMile => "cost_per_mile",
            Metric::DepreciationRate => "depreciation_rate",
            Metric::SpeedPerDollar => "speed_per_dollar",
            Metric::RangePerDollar => "range_per_dollar",
            Metric::PerformancePerDollar => "performance_per_dollar",
            Metric::EfficiencyPerDollar => "efficiency_per_dollar",
            Metric::AllAroundPerDollar => "all_around_per_dollar",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| format!("unknown metric '{s}'"))
    }
}

/// Ordinal condition rating for interior and exterior (paint).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<ConditionValue>", into = "String")]
pub enum Condition {
    #[default]
    Unrated,
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl Condition {
    /// Position on the 0..=5 ordinal scale used by buyer minimums.
    pub fn ordinal(self) -> u8 {
        match self {
            Condition::Unrated => 0,
            Condition::Poor => 1,
            Condition::Fair => 2,
            Condition::Good => 3,
            Condition::VeryGood => 4,
            Condition::Excellent => 5,
        }
    }

    /// Fixed 0..=100 score used as the cohort percentile input.
    pub fn score(self) -> Decimal {
        Decimal::from(u32::from(self.ordinal()) * 20)
    }

    /// Rating for a 0..=5 ordinal; anything outside the scale is unrated.
    pub fn from_ordinal(ordinal: u64) -> Self {
        match ordinal {
            1 => Condition::Poor,
            2 => Condition::Fair,
            3 => Condition::Good,
            4 => Condition::VeryGood,
            5 => Condition::Excellent,
            _ => Condition::Unrated,
        }
    }

    pub fn is_rated(self) -> bool {
        self != Condition::Unrated
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::Unrated => "",
            Condition::Poor => "poor",
            Condition::Fair => "fair",
            Condition::Good => "good",
            Condition::VeryGood => "very good",
            Condition::Excellent => "excellent",
        }
    }
}

impl From<&str> for Condition {
    fn from(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "excellent" => Condition::Excellent,
            "very good" | "very_good" => Condition::VeryGood,
            "good" => Condition::Good,
            "fair" => Condition::Fair,
            "poor" => Condition::Poor,
            _ => Condition::Unrated,
        }
    }
}

/// A rating as written in JSON: a label such as "very good" or an ordinal.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConditionValue {
    Ordinal(u64),
    Label(String),
}

impl From<Option<ConditionValue>> for Condition {
    fn from(value: Option<ConditionValue>) -> Self {
        match value {
            Some(ConditionValue::Ordinal(ordinal)) => Condition::from_ordinal(ordinal),
            Some(ConditionValue::Label(label)) => Condition::from(label.as_str()),
            None => Condition::Unrated,
        }
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.label().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Partial,
    #[default]
    Pending,
}

/// Integer field that also accepts integral floats such as `8.0`.
fn whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let Some(value) = Option::<Decimal>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if !value.fract().is_zero() {
        return Err(D::Error::custom(format!("expected a whole number, got {value}")));
    }
    value
        .to_i64()
        .and_then(|v| T::try_from(v).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("{value} is out of range")))
}
