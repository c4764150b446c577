//! Rounding and ratio helpers for derived statistics
//!
//! All rounding is half-up toward positive infinity (`floor(x + 0.5)`),
//! so -2.5 rounds to -2 and 2.5 rounds to 3. Ratios guard against a zero
//! denominator instead of failing.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Round half-up to `dp` decimal places
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let factor = Decimal::from(10u64.pow(dp));
    ((value * factor + dec!(0.5)).floor() / factor).normalize()
}

/// Round half-up to a whole number
pub fn round_whole(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// `numerator / denominator` rounded to one decimal, 0 for a zero denominator
pub fn average_1dp(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    round_half_up(numerator / denominator, 1)
}

/// Whole minutes from a second count
pub fn seconds_to_minutes(seconds: Decimal) -> u32 {
    round_whole(seconds / dec!(60)).to_u32().unwrap_or(0)
}

/// Whole-number percent change from `previous` to `current`.
///
/// A zero baseline yields 100 when anything was gained and 0 otherwise.
pub fn percent_change(current: Decimal, previous: Decimal) -> i64 {
    if previous.is_zero() {
        return if current > Decimal::ZERO { 100 } else { 0 };
    }
    round_whole((current - previous) / previous * dec!(100))
        .to_i64()
        .unwrap_or(0)
}

/// Whole-number share of `part` in `whole`, 0 when `whole` is zero
pub fn percentage(part: Decimal, whole: Decimal) -> u32 {
    if whole.is_zero() {
        return 0;
    }
    round_whole(part / whole * dec!(100)).to_u32().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(2.45), 1), dec!(2.5));
        assert_eq!(round_half_up(dec!(2.44), 1), dec!(2.4));
        assert_eq!(round_whole(dec!(2.5)), dec!(3));
        assert_eq!(round_whole(dec!(-2.5)), dec!(-2));
        assert_eq!(round_whole(dec!(-2.6)), dec!(-3));
    }

    #[test]
    fn test_average_guards_zero() {
        assert_eq!(average_1dp(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(average_1dp(dec!(10), dec!(3)), dec!(3.3));
        assert_eq!(average_1dp(dec!(20), dec!(3)), dec!(6.7));
    }

    #[test]
    fn test_seconds_to_minutes() {
        assert_eq!(seconds_to_minutes(dec!(3600)), 60);
        assert_eq!(seconds_to_minutes(dec!(89)), 1);
        assert_eq!(seconds_to_minutes(dec!(90)), 2);
        assert_eq!(seconds_to_minutes(Decimal::ZERO), 0);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(dec!(150), dec!(100)), 50);
        assert_eq!(percent_change(dec!(50), dec!(100)), -50);
        assert_eq!(percent_change(dec!(2), dec!(3)), -33);
        assert_eq!(percent_change(dec!(500), Decimal::ZERO), 100);
        assert_eq!(percent_change(Decimal::ZERO, Decimal::ZERO), 0);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(dec!(1), dec!(3)), 33);
        assert_eq!(percentage(dec!(2), dec!(3)), 67);
        assert_eq!(percentage(dec!(5), Decimal::ZERO), 0);
    }
}
