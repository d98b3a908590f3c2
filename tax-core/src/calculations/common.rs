//! Common utility functions for tax calculations.
//!
//! This module provides the small numeric helpers shared by the calculators,
//! the orchestrator and the reporting layer: floored subtraction, percentage
//! conversion and rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Subtracts a deduction from an amount, never going below zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::apply_deduction;
///
/// assert_eq!(apply_deduction(dec!(1000.00), dec!(250.00)), dec!(750.00));
/// assert_eq!(apply_deduction(dec!(1000.00), dec!(4115.00)), dec!(0));
/// ```
pub fn apply_deduction(
    amount: Decimal,
    deduction: Decimal,
) -> Decimal {
    (amount - deduction).max(Decimal::ZERO)
}

/// Converts a human-entered percentage (`7.15`) into a fraction (`0.0715`).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::percent_to_fraction;
///
/// assert_eq!(percent_to_fraction(dec!(7.15)), dec!(0.0715));
/// ```
pub fn percent_to_fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Rounds to whole currency units, midpoint away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(449.5)), dec!(450));
/// assert_eq!(round_whole(dec!(449.49)), dec!(449));
/// assert_eq!(round_whole(dec!(-12.5)), dec!(-13));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole currency units, midpoint toward positive infinity.
///
/// Differences between two systems use this so that a loss of 4.5 shows as
/// -4 and a gain of 4.5 as 5.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_whole_half_ceiling;
///
/// assert_eq!(round_whole_half_ceiling(dec!(4.5)), dec!(5));
/// assert_eq!(round_whole_half_ceiling(dec!(-4.5)), dec!(-4));
/// assert_eq!(round_whole_half_ceiling(dec!(-4.51)), dec!(-5));
/// ```
pub fn round_whole_half_ceiling(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero). Only used for presentation;
/// the pipeline itself never rounds intermediate values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
