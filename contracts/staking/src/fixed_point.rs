//! 18-decimal fixed-point helpers.
//!
//! Every proportional computation in the engine goes through [`mul_div`], which
//! multiplies with overflow detection and floors the quotient. Amounts are
//! never negative, so flooring and truncation toward zero coincide.

use crate::errors::ContractError;

/// Fixed-point base: `1.0 == SCALE`.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// `a * b / denominator`, floored.
///
/// Fails with `Overflow` when `a * b` does not fit in an `i128` or the
/// denominator is zero, and with `InvalidAmount` on negative operands.
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, ContractError> {
    if a < 0 || b < 0 || denominator < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if denominator == 0 {
        return Err(ContractError::Overflow);
    }
    a.checked_mul(b)
        .map(|product| product / denominator)
        .ok_or(ContractError::Overflow)
}

/// `amount * numerator / denominator`, floored.
pub fn fraction_of(amount: i128, numerator: i128, denominator: i128) -> Result<i128, ContractError> {
    mul_div(amount, numerator, denominator)
}

/// `amount * fraction / SCALE` for an 18-decimal `fraction`.
pub fn apply_fraction(amount: i128, fraction: i128) -> Result<i128, ContractError> {
    mul_div(amount, fraction, SCALE)
}

/// Converts `numerator / denominator` into an 18-decimal fraction.
pub fn to_fraction(numerator: i128, denominator: i128) -> Result<i128, ContractError> {
    mul_div(numerator, SCALE, denominator)
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

pub fn checked_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    match a.checked_sub(b) {
        Some(v) if v >= 0 => Ok(v),
        _ => Err(ContractError::Underflow),
    }
}
