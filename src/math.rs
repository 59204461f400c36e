// src/math.rs
use crate::shared::errors::PoolError;
use crate::shared::types::FeeRatio;

/// Integer division rounding toward positive infinity
pub fn ceil_div(numerator: u128, denominator: u128) -> u128 {
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        quotient
    } else {
        quotient + 1
    }
}

/// Gross output of a constant-product swap, rounded up.
///
/// Equivalent to `ceil(to - (from * to) / (from + amount_in))` evaluated over
/// the reals, since `to - from*to/(from+in) == to*in/(from+in)`.
/// Caller guarantees `from_reserve > 0`.
pub fn gross_swap_output(from_reserve: u64, to_reserve: u64, amount_in: u64) -> u64 {
    let new_from = from_reserve as u128 + amount_in as u128;
    let gross = ceil_div(to_reserve as u128 * amount_in as u128, new_from);
    // in / (from + in) < 1, so the ceiling never exceeds the destination reserve
    gross as u64
}

/// Fee withheld from a gross amount, rounded down
pub fn fee_amount(gross: u64, fee: FeeRatio) -> u64 {
    (gross as u128 * fee.numerator() as u128 / fee.denominator() as u128) as u64
}

/// `amount * numerator / denominator` rounded up, or `Overflow` if it does not fit in u64
pub fn mul_div_ceil(amount: u64, numerator: u64, denominator: u64) -> Result<u64, PoolError> {
    let value = ceil_div(amount as u128 * numerator as u128, denominator as u128);
    u64::try_from(value).map_err(|_| PoolError::Overflow)
}
