//! Rounding helpers for monetary and physical quantities.
//!
//! All values are exact decimals. Output fields are rounded half-up to two
//! decimals exactly once; intermediate sums keep full precision.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for every reported amount.
pub const OUTPUT_SCALE: u32 = 2;

/// Precision kept for a percentage before it is rounded for output.
const PERCENT_SCALE: u32 = 4;

/// Round half-up to [`OUTPUT_SCALE`] decimals.
#[must_use]
pub fn round_output(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(OUTPUT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round half-up to the nearest whole number.
#[must_use]
pub fn round_whole(value: Decimal) -> u32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or_default()
}

/// Split `total` evenly over `units`, zero when there are no units.
#[must_use]
pub fn per_unit(total: Decimal, units: u32) -> Decimal {
    if units == 0 {
        return Decimal::ZERO;
    }
    round_output(total / Decimal::from(units))
}

/// Relative difference of `value` against `average` in percent.
///
/// Returns zero when `average` is zero.
#[must_use]
pub fn percentage_difference(value: Decimal, average: Decimal) -> Decimal {
    if average.is_zero() {
        return Decimal::ZERO;
    }
    let ratio = ((value - average) / average * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    round_output(ratio)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_output(dec!(1.005)), dec!(1.01), "midpoint goes up");
        assert_eq!(round_output(dec!(1.004)), dec!(1.00), "below midpoint");
        assert_eq!(round_whole(dec!(12.5)), 13, "whole midpoint goes up");
        assert_eq!(round_whole(dec!(12.49)), 12, "whole below midpoint");
    }

    #[test]
    fn per_unit_with_zero_units_is_zero() {
        assert_eq!(per_unit(dec!(1000), 0), Decimal::ZERO, "no division by zero");
        assert_eq!(per_unit(dec!(1000), 3), dec!(333.33), "rounded share");
    }

    #[test]
    fn percentage_difference_against_peers() {
        assert_eq!(percentage_difference(dec!(1000), dec!(1500)), dec!(-33.33), "one peer");
        assert_eq!(percentage_difference(dec!(1000), dec!(1650)), dec!(-39.39), "two peers");
        assert_eq!(percentage_difference(dec!(150), dec!(100)), dec!(50.00), "above average");
    }

    #[test]
    fn percentage_difference_guards_zero_average() {
        assert_eq!(percentage_difference(dec!(500), Decimal::ZERO), Decimal::ZERO, "guarded");
    }
}
