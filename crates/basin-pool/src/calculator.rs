//! Swap math using the constant product formula (x * y = k)
//!
//! All intermediates widen to `BigUint` so products of two u128 amounts
//! cannot wrap; narrowing back is checked.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use basin_core::{Amount, Error, Result};

use crate::constants::price;

/// Output for a given input.
///
/// Formula: out = floor(amount_in * reserve_out / (reserve_in + amount_in))
///
/// Flooring is the defining correctness property: the post-trade product
/// never decreases, and the result is always strictly less than
/// `reserve_out`, so one finite swap can never drain a side.
pub fn amount_out(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if amount_in == 0 {
        return Err(Error::InvalidAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(Error::InvalidReserves);
    }

    let numerator = BigUint::from(amount_in) * BigUint::from(reserve_out);
    let denominator = BigUint::from(reserve_in) + BigUint::from(amount_in);
    let out = numerator / denominator;

    out.to_u128().ok_or(Error::AmountOverflow)
}

/// Required input for a desired output (reverse quote, rounded up).
///
/// Formula: in = floor(reserve_in * out / (reserve_out - out)) + 1
pub fn amount_in_for(
    desired_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<Amount> {
    if desired_out == 0 {
        return Err(Error::InvalidAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(Error::InvalidReserves);
    }
    if desired_out >= reserve_out {
        return Err(Error::InsufficientReserves {
            requested: desired_out,
            available: reserve_out,
        });
    }

    let numerator = BigUint::from(reserve_in) * BigUint::from(desired_out);
    let denominator = BigUint::from(reserve_out - desired_out);
    let input = numerator / denominator + BigUint::from(1u8);

    input.to_u128().ok_or(Error::AmountOverflow)
}

/// Spot price of the input asset in output-asset units, scaled by 1e18.
///
/// Requires a funded pool on both sides; a price against empty reserves is
/// meaningless.
pub fn spot_price(reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(Error::InvalidReserves);
    }

    let scaled = BigUint::from(reserve_out) * BigUint::from(price::SCALE) / BigUint::from(reserve_in);
    scaled.to_u128().ok_or(Error::AmountOverflow)
}
