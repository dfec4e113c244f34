//! Integer fixed-point helpers for allocation and fee accounting.
//!
//! Every function multiplies before it divides, truncates toward zero and
//! reports overflow as [`Error::ArithmeticOverflow`].

use crate::types::{FeeOrder, ProceedsSplit};
use crate::Error;

pub const BPS_DENOMINATOR: i128 = 10_000;

fn pow10(exp: u32) -> Result<i128, Error> {
    10i128.checked_pow(exp).ok_or(Error::ArithmeticOverflow)
}

fn mul(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_mul(b).ok_or(Error::ArithmeticOverflow)
}

/// Sale tokens owed for `contributed` base units at `price` tokens per unit.
///
/// Only the difference between the two decimal counts is applied, so the
/// intermediate product stays as small as the result allows.
pub fn tokens_claimable(
    contributed: i128,
    price: i128,
    base_decimals: u32,
    token_decimals: u32,
) -> Result<i128, Error> {
    let value = mul(contributed, price)?;
    if token_decimals >= base_decimals {
        mul(value, pow10(token_decimals - base_decimals)?)
    } else {
        Ok(value / pow10(base_decimals - token_decimals)?)
    }
}

/// Floor of `amount * bps / 10_000`.
pub fn bps_of(amount: i128, bps: u32) -> Result<i128, Error> {
    Ok(mul(amount, bps as i128)? / BPS_DENOMINATOR)
}

/// Split a successful raise into platform fee, liquidity share and creator
/// payout. The parts always sum to `gross`; flooring dust goes to the
/// platform fee.
pub fn split_proceeds(
    gross: i128,
    fee_bps: u32,
    creator_fee_bps: u32,
    order: FeeOrder,
) -> Result<ProceedsSplit, Error> {
    let fee = fee_bps as i128;
    let cut = creator_fee_bps as i128;
    let denom_sq = BPS_DENOMINATOR * BPS_DENOMINATOR;

    let liquidity = match order {
        FeeOrder::PlatformFirst => mul(mul(gross, BPS_DENOMINATOR - fee)?, cut)? / denom_sq,
        FeeOrder::CreatorFirst => mul(gross, cut)? / BPS_DENOMINATOR,
    };
    let creator_payout =
        mul(mul(gross, BPS_DENOMINATOR - fee)?, BPS_DENOMINATOR - cut)? / denom_sq;
    let platform_fee = gross - liquidity - creator_payout;

    Ok(ProceedsSplit {
        platform_fee,
        liquidity,
        creator_payout,
    })
}

/// Listing tokens the largest possible liquidity share can require.
pub fn listing_reserve(
    hard_cap: i128,
    creator_fee_bps: u32,
    listing_price: i128,
    base_decimals: u32,
    token_decimals: u32,
) -> Result<i128, Error> {
    let max_liquidity = bps_of(hard_cap, creator_fee_bps)?;
    tokens_claimable(max_liquidity, listing_price, base_decimals, token_decimals)
}
