//! Percentage normalization of raw metric values.
//!
//! Maps a raw value onto 0..=100 where 100 is always "best", flipping the scale
//! for lower-is-better metrics such as price or runway length.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::models::{Direction, Metric};
use crate::scoring::bounds::MetricBounds;

pub const SCORE_MIN: Decimal = Decimal::ZERO;
pub const SCORE_MAX: Decimal = dec!(100);
pub const NEUTRAL_SCORE: Decimal = dec!(50);

/// Normalize `value` of `metric` against `bounds`.
///
/// Missing or non-positive values score 0: absent data is never rewarded.
/// When every candidate shares the same value the metric carries no ranking
/// signal and all present values score a neutral 50.
pub fn normalize(metric: Metric, value: Option<Decimal>, bounds: &MetricBounds) -> Decimal {
    let Some(value) = value.filter(|v| *v > Decimal::ZERO) else {
        return SCORE_MIN;
    };

    if bounds.uniform {
        return NEUTRAL_SCORE;
    }

    let span = bounds.span();
    if span <= Decimal::ZERO {
        return NEUTRAL_SCORE;
    }

    let position = match metric.direction() {
        Direction::HigherIsBetter => value - bounds.min,
        Direction::LowerIsBetter => bounds.max - value,
    };

    match position.checked_div(span).and_then(|r| r.checked_mul(SCORE_MAX)) {
        Some(score) => clamp_score(score),
        // Too far outside the bounds to represent: the clamp would pin it anyway.
        None if position > Decimal::ZERO => SCORE_MAX,
        None => SCORE_MIN,
    }
}

/// Clamp a score into 0..=100.
pub fn clamp_score(score: Decimal) -> Decimal {
    score.clamp(SCORE_MIN, SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: Decimal, max: Decimal) -> MetricBounds {
        MetricBounds {
            min,
            max,
            uniform: false,
        }
    }

    #[test]
    fn test_higher_is_better_extremes() {
        let b = bounds(dec!(1000), dec!(3000));
        assert_eq!(normalize(Metric::Range, Some(dec!(1000)), &b), dec!(0));
        assert_eq!(normalize(Metric::Range, Some(dec!(3000)), &b), dec!(100));
        assert_eq!(normalize(Metric::Range, Some(dec!(2000)), &b), dec!(50));
    }

    #[test]
    fn test_lower_is_better_extremes() {
        let b = bounds(dec!(2000000), dec!(6000000));
        assert_eq!(normalize(Metric::Price, Some(dec!(2000000)), &b), dec!(100));
        assert_eq!(normalize(Metric::Price, Some(dec!(6000000)), &b), dec!(0));
        assert_eq!(normalize(Metric::Price, Some(dec!(3000000)), &b), dec!(75));
    }

    #[test]
    fn test_monotonic_between_bounds() {
        let b = bounds(dec!(100), dec!(900));
        let mut previous_higher = dec!(-1);
        let mut previous_lower = dec!(101);
        for step in 0..=8 {
            let v = dec!(100) + Decimal::from(step) * dec!(100);
            let higher = normalize(Metric::Speed, Some(v), &b);
            let lower = normalize(Metric::RunwayLength, Some(v), &b);
            assert!(higher > previous_higher);
            assert!(lower < previous_lower);
            previous_higher = higher;
            previous_lower = lower;
        }
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let b = bounds(dec!(100), dec!(200));
        assert_eq!(normalize(Metric::Speed, Some(dec!(500)), &b), dec!(100));
        assert_eq!(normalize(Metric::Speed, Some(dec!(50)), &b), dec!(0));
        assert_eq!(normalize(Metric::Price, Some(dec!(50)), &b), dec!(100));
    }

    #[test]
    fn test_missing_or_non_positive_scores_zero() {
        let b = bounds(dec!(100), dec!(200));
        assert_eq!(normalize(Metric::Price, None, &b), dec!(0));
        assert_eq!(normalize(Metric::Price, Some(Decimal::ZERO), &b), dec!(0));
        assert_eq!(normalize(Metric::Speed, Some(dec!(-3)), &b), dec!(0));
    }

    #[test]
    fn test_uniform_bounds_score_neutral() {
        let b = MetricBounds {
            min: dec!(5),
            max: dec!(6),
            uniform: true,
        };
        assert_eq!(normalize(Metric::SpeedPerDollar, Some(dec!(5)), &b), dec!(50));
        assert_eq!(normalize(Metric::Price, Some(dec!(5)), &b), dec!(50));
        assert_eq!(normalize(Metric::Price, None, &b), dec!(0));
    }

    #[test]
    fn test_extreme_values_pin_to_the_ends() {
        let tiny = bounds(dec!(0.0000000001), dec!(0.0000000002));
        let huge = Decimal::MAX / dec!(2);
        assert_eq!(normalize(Metric::Speed, Some(huge), &tiny), dec!(100));
        assert_eq!(normalize(Metric::Price, Some(huge), &tiny), dec!(0));
    }
}
