// SPDX-License-Identifier: MIT

//! Pool pricing
//!
//! Q64.64 single-range concentrated liquidity and constant product curves.
//! Every rounding step favors the pool.

use belugaswap_margin::MarginError;
use soroban_sdk::{Env, U256};

pub const Q64: u128 = 1u128 << 64;

const BPS: i128 = 10_000;

// ============================================================
// HELPERS
// ============================================================

/// Integer square root, rounded down
pub fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// `a * b / den` rounded down, through U256
fn mul_div(env: &Env, a: u128, b: u128, den: u128) -> Result<u128, MarginError> {
    if den == 0 {
        return Err(MarginError::Overflow);
    }
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    product
        .div(&U256::from_u128(env, den))
        .to_u128()
        .ok_or(MarginError::Overflow)
}

/// `a * b / den` rounded up
fn mul_div_up(env: &Env, a: u128, b: u128, den: u128) -> Result<u128, MarginError> {
    if den == 0 {
        return Err(MarginError::Overflow);
    }
    let den_256 = U256::from_u128(env, den);
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let quotient = product.div(&den_256).to_u128().ok_or(MarginError::Overflow)?;
    if product.rem_euclid(&den_256) == U256::from_u128(env, 0) {
        Ok(quotient)
    } else {
        quotient.checked_add(1).ok_or(MarginError::Overflow)
    }
}

fn to_i128(x: u128) -> Result<i128, MarginError> {
    i128::try_from(x).map_err(|_| MarginError::Overflow)
}

fn to_u128(x: i128) -> Result<u128, MarginError> {
    u128::try_from(x).map_err(|_| MarginError::InvalidAmount)
}

// ============================================================
// CONCENTRATED LIQUIDITY
// ============================================================

/// Outcome of one concentrated swap
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClmmStep {
    pub sqrt_price_next: u128,
    pub amount_in: i128,
    pub amount_out: i128,
}

/// Liquidity and sqrt price of a range holding `reserve0` / `reserve1`
pub fn clmm_from_reserves(reserve0: i128, reserve1: i128) -> Result<(u128, u128), MarginError> {
    if reserve0 <= 0 || reserve1 <= 0 {
        return Err(MarginError::InvalidAmount);
    }
    let r0 = to_u128(reserve0)?;
    let r1 = to_u128(reserve1)?;
    let liquidity = isqrt(r0.checked_mul(r1).ok_or(MarginError::Overflow)?);
    let price_x64 = r1.checked_mul(Q64).ok_or(MarginError::Overflow)? / r0;
    let sqrt_price_x64 = isqrt(price_x64)
        .checked_mul(1u128 << 32)
        .ok_or(MarginError::Overflow)?;
    Ok((liquidity, sqrt_price_x64))
}

/// Price a swap of `amount_specified` (positive = exact input, negative =
/// exact output) against a single range
pub fn clmm_swap_step(
    env: &Env,
    sqrt_price: u128,
    liquidity: u128,
    fee_bps: u32,
    zero_for_one: bool,
    amount_specified: i128,
) -> Result<ClmmStep, MarginError> {
    if amount_specified == 0 || liquidity == 0 || sqrt_price == 0 {
        return Err(MarginError::InsufficientLiquidity);
    }
    let fee = fee_bps as i128;
    let l_x64 = liquidity.checked_mul(Q64).ok_or(MarginError::Overflow)?;

    if amount_specified > 0 {
        let amount_in = amount_specified;
        let net = to_u128(amount_in.checked_mul(BPS - fee).ok_or(MarginError::Overflow)? / BPS)?;
        let (sqrt_next, amount_out) = if zero_for_one {
            let grow = net.checked_mul(sqrt_price).ok_or(MarginError::Overflow)?;
            let den = l_x64.checked_add(grow).ok_or(MarginError::Overflow)?;
            let next = mul_div_up(env, l_x64, sqrt_price, den)?;
            (next, mul_div(env, liquidity, sqrt_price - next, Q64)?)
        } else {
            let next = sqrt_price
                .checked_add(mul_div(env, net, Q64, liquidity)?)
                .ok_or(MarginError::Overflow)?;
            let scaled = mul_div(env, l_x64, next - sqrt_price, next)?;
            (next, scaled / sqrt_price)
        };
        return Ok(ClmmStep {
            sqrt_price_next: sqrt_next,
            amount_in,
            amount_out: to_i128(amount_out)?,
        });
    }

    let amount_out = amount_specified.checked_neg().ok_or(MarginError::Overflow)?;
    let out = to_u128(amount_out)?;
    let (sqrt_next, net_in) = if zero_for_one {
        let drop = mul_div_up(env, out, Q64, liquidity)?;
        if drop >= sqrt_price {
            return Err(MarginError::InsufficientLiquidity);
        }
        let next = sqrt_price - drop;
        let scaled = mul_div_up(env, l_x64, sqrt_price - next, sqrt_price)?;
        (next, scaled.div_ceil(next))
    } else {
        let shrink = out.checked_mul(sqrt_price).ok_or(MarginError::Overflow)?;
        if shrink >= l_x64 {
            return Err(MarginError::InsufficientLiquidity);
        }
        let next = mul_div_up(env, l_x64, sqrt_price, l_x64 - shrink)?;
        (next, mul_div_up(env, liquidity, next - sqrt_price, Q64)?)
    };
    let gross_in = mul_div_up(env, net_in, BPS as u128, (BPS - fee) as u128)?;

    Ok(ClmmStep {
        sqrt_price_next: sqrt_next,
        amount_in: to_i128(gross_in)?,
        amount_out,
    })
}

// ============================================================
// CONSTANT PRODUCT
// ============================================================

/// Output for `amount_in` against `(reserve_in, reserve_out)`
pub fn pair_amount_out(
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Result<i128, MarginError> {
    if amount_in <= 0 {
        return Err(MarginError::InvalidAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 {
        return Err(MarginError::InsufficientLiquidity);
    }
    let with_fee = amount_in
        .checked_mul(BPS - fee_bps as i128)
        .ok_or(MarginError::Overflow)?;
    let numerator = with_fee.checked_mul(reserve_out).ok_or(MarginError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(BPS)
        .and_then(|r| r.checked_add(with_fee))
        .ok_or(MarginError::Overflow)?;
    Ok(numerator / denominator)
}

/// Input required for `amount_out` against `(reserve_in, reserve_out)`
pub fn pair_amount_in(
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Result<i128, MarginError> {
    if amount_out <= 0 {
        return Err(MarginError::InvalidAmount);
    }
    if reserve_in <= 0 || amount_out >= reserve_out {
        return Err(MarginError::InsufficientLiquidity);
    }
    let numerator = reserve_in
        .checked_mul(amount_out)
        .and_then(|n| n.checked_mul(BPS))
        .ok_or(MarginError::Overflow)?;
    let denominator = (reserve_out - amount_out)
        .checked_mul(BPS - fee_bps as i128)
        .ok_or(MarginError::Overflow)?;
    Ok(numerator / denominator + 1)
}

/// Fee-adjusted `k` must not shrink across a swap
pub fn pair_invariant_holds(
    balance0: i128,
    balance1: i128,
    amount0_in: i128,
    amount1_in: i128,
    reserve0: i128,
    reserve1: i128,
    fee_bps: u32,
) -> Result<bool, MarginError> {
    let fee = fee_bps as i128;
    let adjusted0 = balance0
        .checked_mul(BPS)
        .and_then(|b| b.checked_sub(amount0_in.checked_mul(fee)?))
        .ok_or(MarginError::Overflow)?;
    let adjusted1 = balance1
        .checked_mul(BPS)
        .and_then(|b| b.checked_sub(amount1_in.checked_mul(fee)?))
        .ok_or(MarginError::Overflow)?;
    let after = adjusted0.checked_mul(adjusted1).ok_or(MarginError::Overflow)?;
    let before = reserve0
        .checked_mul(reserve1)
        .and_then(|k| k.checked_mul(BPS * BPS))
        .ok_or(MarginError::Overflow)?;
    Ok(after >= before)
}
