//! Hard buyer constraints.
//!
//! Records failing any constraint are removed before scoring so they never
//! influence normalization bounds and never appear in ranked output.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::models::AircraftRecord;

/// Trips per year assumed when projecting annual operating cost.
pub const DEFAULT_YEARLY_TRIPS: u32 = 100;

/// Optional hard thresholds. `None` means no constraint on that axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub budget: Option<Decimal>,
    pub min_range: Option<Decimal>,
    pub min_passengers: Option<u32>,
    pub min_speed: Option<Decimal>,
    pub max_runway: Option<Decimal>,
    pub max_hourly_cost: Option<Decimal>,
    pub lowest_year: Option<i32>,
    pub min_altitude: Option<Decimal>,
    pub min_cabin_volume: Option<Decimal>,
    pub max_annual_cost: Option<Decimal>,
    pub yearly_trips: Option<u32>,
}

/// The first constraint a record failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum Violation {
    OverBudget { price: Decimal, budget: Decimal },
    InsufficientRange { range: Decimal, required: Decimal },
    TooFewSeats { passengers: u32, required: u32 },
    TooOld { year: i32, lowest: i32 },
    TooSlow { speed: Decimal, required: Decimal },
    AltitudeTooLow { altitude: Decimal, required: Decimal },
    RunwayTooLong { runway: Decimal, max: Decimal },
    CabinTooSmall { volume: Decimal, required: Decimal },
    AnnualCostTooHigh { annual_cost: Decimal, max: Decimal },
    HourlyCostTooHigh { hourly_cost: Decimal, max: Decimal },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverBudget { price, budget } => {
                write!(f, "price ${price} exceeds budget ${budget}")
            }
            Self::InsufficientRange { range, required } => {
                write!(f, "range {range} nm below required {required} nm")
            }
            Self::TooFewSeats {
                passengers,
                required,
            } => write!(f, "{passengers} seats below required {required}"),
            Self::TooOld { year, lowest } => write!(f, "year {year} older than {lowest}"),
            Self::TooSlow { speed, required } => {
                write!(f, "speed {speed} kts below required {required} kts")
            }
            Self::AltitudeTooLow { altitude, required } => {
                write!(f, "ceiling {altitude} ft below required {required} ft")
            }
            Self::RunwayTooLong { runway, max } => {
                write!(f, "runway {runway} ft exceeds available {max} ft")
            }
            Self::CabinTooSmall { volume, required } => {
                write!(f, "cabin {volume} cu ft below required {required} cu ft")
            }
            Self::AnnualCostTooHigh { annual_cost, max } => {
                write!(f, "annual cost ${annual_cost} exceeds ${max}")
            }
            Self::HourlyCostTooHigh { hourly_cost, max } => {
                write!(f, "hourly cost ${hourly_cost} exceeds ${max}")
            }
        }
    }
}

/// A record excluded by the filter.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub record_id: String,
    pub violation: Violation,
}

/// Output of the constraint filter.
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub accepted: Vec<&'a AircraftRecord>,
    pub rejected: Vec<Rejection>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        *self == Constraints::default()
    }

    /// Check a single record, returning the first failed constraint.
    ///
    /// A missing record value reads as zero, so an unknown price never breaks a
    /// budget while an unknown range always fails a minimum range.
    pub fn check(&self, record: &AircraftRecord) -> Option<Violation> {
        let zero = Decimal::ZERO;
        let active = |limit: Option<Decimal>| limit.filter(|l| *l > zero);

        if let Some(budget) = active(self.budget) {
            let price = record.price.unwrap_or(zero);
            if price > budget {
                return Some(Violation::OverBudget { price, budget });
            }
        }

        if let Some(required) = active(self.min_range) {
            let range = record.range.unwrap_or(zero);
            if range < required {
                return Some(Violation::InsufficientRange { range, required });
            }
        }

        if let Some(required) = self.min_passengers.filter(|p| *p > 0) {
            let passengers = record.passengers.unwrap_or(0);
            if passengers < required {
                return Some(Violation::TooFewSeats {
                    passengers,
                    required,
                });
            }
        }

        if let Some(lowest) = self.lowest_year.filter(|y| *y > 0) {
            let year = record.year.unwrap_or(0);
            if year < lowest {
                return Some(Violation::TooOld { year, lowest });
            }
        }

        if let Some(required) = active(self.min_speed) {
            let speed = record.speed.unwrap_or(zero);
            if speed < required {
                return Some(Violation::TooSlow { speed, required });
            }
        }

        if let Some(required) = active(self.min_altitude) {
            let altitude = record.max_altitude.unwrap_or(zero);
            if altitude < required {
                return Some(Violation::AltitudeTooLow { altitude, required });
            }
        }

        if let Some(max) = active(self.max_runway) {
            let runway = record.runway_length.unwrap_or(zero);
            if runway > max {
                return Some(Violation::RunwayTooLong { runway, max });
            }
        }

        if let Some(required) = active(self.min_cabin_volume) {
            let volume = record.cabin_volume.unwrap_or(zero);
            if volume < required {
                return Some(Violation::CabinTooSmall { volume, required });
            }
        }

        let hourly_cost = record.total_hourly_cost.unwrap_or(zero);

        if let Some(max) = active(self.max_annual_cost) {
            let trips = self.yearly_trips.unwrap_or(DEFAULT_YEARLY_TRIPS);
            let annual_cost = hourly_cost
                .checked_mul(Decimal::from(trips))
                .unwrap_or(Decimal::MAX);
            if annual_cost > max {
                return Some(Violation::AnnualCostTooHigh { annual_cost, max });
            }
        }

        if let Some(max) = active(self.max_hourly_cost) {
            if hourly_cost > max {
                return Some(Violation::HourlyCostTooHigh { hourly_cost, max });
            }
        }

        None
    }

    /// Split `catalog` into records meeting every constraint and rejections.
    pub fn apply<'a>(&self, catalog: &'a [AircraftRecord]) -> FilterOutcome<'a> {
        let mut accepted = Vec::with_capacity(catalog.len());
        let mut rejected = Vec::new();

        for record in catalog {
            match self.check(record) {
                None => accepted.push(record),
                Some(violation) => {
                    debug!(record = %record.id, reason = %violation, "Excluded by hard constraint");
                    rejected.push(Rejection {
                        record_id: record.id.clone(),
                        violation,
                    });
                }
            }
        }

        FilterOutcome { accepted, rejected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn jet(id: &str, price: Decimal, range: Decimal) -> AircraftRecord {
        AircraftRecord {
            id: id.to_string(),
            price: Some(price),
            range: Some(range),
            passengers: Some(8),
            total_hourly_cost: Some(dec!(3000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_constraints_accepts_everything() {
        let catalog = vec![jet("a", dec!(1000000), dec!(900)), AircraftRecord::default()];
        let outcome = Constraints::default().apply(&catalog);
        assert_eq!(outcome.accepted.len(), 2);
        assert!(outcome.rejected.is_empty());
        assert!(Constraints::default().is_empty());
    }

    #[test]
    fn test_budget_and_range() {
        let constraints = Constraints {
            budget: Some(dec!(5000000)),
            min_range: Some(dec!(1500)),
            ..Default::default()
        };
        let catalog = vec![
            jet("ok", dec!(4000000), dec!(2000)),
            jet("pricey", dec!(6000000), dec!(3000)),
            jet("short", dec!(3000000), dec!(1200)),
        ];

        let outcome = constraints.apply(&catalog);
        let ids: Vec<&str> = outcome.accepted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
        assert_eq!(
            outcome.rejected[0].violation,
            Violation::OverBudget {
                price: dec!(6000000),
                budget: dec!(5000000)
            }
        );
        assert!(matches!(
            outcome.rejected[1].violation,
            Violation::InsufficientRange { .. }
        ));
    }

    #[test]
    fn test_missing_values_read_as_zero() {
        let constraints = Constraints {
            budget: Some(dec!(5000000)),
            ..Default::default()
        };
        let unknown_price = AircraftRecord {
            id: "x".to_string(),
            ..Default::default()
        };
        assert!(constraints.check(&unknown_price).is_none());

        let constraints = Constraints {
            min_range: Some(dec!(1000)),
            ..Default::default()
        };
        assert!(matches!(
            constraints.check(&unknown_price),
            Some(Violation::InsufficientRange { .. })
        ));
    }

    #[test]
    fn test_annual_cost_uses_yearly_trips() {
        let record = jet("a", dec!(1000000), dec!(1000));
        let constraints = Constraints {
            max_annual_cost: Some(dec!(250000)),
            ..Default::default()
        };
        // 3000/hr * 100 trips = 300k > 250k
        assert!(matches!(
            constraints.check(&record),
            Some(Violation::AnnualCostTooHigh { .. })
        ));

        let constraints = Constraints {
            max_annual_cost: Some(dec!(250000)),
            yearly_trips: Some(50),
            ..Default::default()
        };
        assert!(constraints.check(&record).is_none());
    }

    #[test]
    fn test_annual_cost_overflow_is_rejected() {
        let mut record = jet("a", dec!(1000000), dec!(1000));
        record.total_hourly_cost = Some(Decimal::MAX / dec!(10));
        let constraints = Constraints {
            max_annual_cost: Some(dec!(250000)),
            ..Default::default()
        };
        assert!(matches!(
            constraints.check(&record),
            Some(Violation::AnnualCostTooHigh { annual_cost, .. }) if annual_cost == Decimal::MAX
        ));
    }

    #[test]
    fn test_zero_thresholds_are_inactive() {
        let constraints = Constraints {
            budget: Some(Decimal::ZERO),
            min_passengers: Some(0),
            ..Default::default()
        };
        assert!(constraints.check(&jet("a", dec!(90000000), dec!(10))).is_none());
    }

    #[test]
    fn test_violation_messages() {
        let v = Violation::RunwayTooLong {
            runway: dec!(5200),
            max: dec!(4000),
        };
        assert_eq!(v.to_string(), "runway 5200 ft exceeds available 4000 ft");
    }
}
