//! Percentile position within a cohort.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Position of `value` among `population`, scaled to 0..=100.
///
/// The population is sorted ascending and `value` takes the index of the first
/// element equal to it, so ties share the lower rank. Returns `None` when there
/// are fewer than two members to compare against.
pub fn percentile_rank(value: Decimal, population: &[Decimal]) -> Option<Decimal> {
    if population.len() < 2 {
        return None;
    }

    let rank = population.iter().filter(|v| **v < value).count();
    let last = population.len() - 1;
    let percentile = Decimal::from(rank.min(last)) / Decimal::from(last) * dec!(100);
    Some(percentile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_values_evenly_spaced() {
        let population = [dec!(300), dec!(100), dec!(400), dec!(200), dec!(500)];
        let mut ranks: Vec<Decimal> = population
            .iter()
            .map(|v| percentile_rank(*v, &population).unwrap())
            .collect();
        ranks.sort();
        assert_eq!(ranks, vec![dec!(0), dec!(25), dec!(50), dec!(75), dec!(100)]);
    }

    #[test]
    fn test_ties_share_lower_rank() {
        let population = [dec!(60), dec!(60), dec!(100)];
        assert_eq!(percentile_rank(dec!(60), &population), Some(dec!(0)));
        assert_eq!(percentile_rank(dec!(100), &population), Some(dec!(100)));
    }

    #[test]
    fn test_too_small_population() {
        assert_eq!(percentile_rank(dec!(1), &[dec!(1)]), None);
        assert_eq!(percentile_rank(dec!(1), &[]), None);
    }
}
