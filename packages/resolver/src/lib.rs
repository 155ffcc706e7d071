#![no_std]

//! # BelugaSwap Pool Resolver
//!
//! Derives pool addresses from `(tokenA, tokenB, fee, protocol_id)` with no
//! storage read and no contract call. Every pool is deployed by its
//! venue's factory with the salt `sha256(xdr(token0) ‖ xdr(token1) ‖ xdr(fee))`,
//! so the address is a pure function of those inputs and the factory.

mod error;
mod types;

pub use error::ResolveError;
pub use types::{PoolFamily, Venue, VenueTable};

use soroban_sdk::{xdr::ToXdr, Address, BytesN, Env};

/// Order two tokens the way factories store them (`token0 < token1`)
pub fn sort_tokens(
    token_a: &Address,
    token_b: &Address,
) -> Result<(Address, Address), ResolveError> {
    if token_a == token_b {
        return Err(ResolveError::IdenticalTokens);
    }
    if token_a < token_b {
        Ok((token_a.clone(), token_b.clone()))
    } else {
        Ok((token_b.clone(), token_a.clone()))
    }
}

/// Deployment salt for the pool of a sorted pair
pub fn pool_salt(env: &Env, token0: &Address, token1: &Address, fee_bps: u32) -> BytesN<32> {
    let mut salt_data = token0.clone().to_xdr(env);
    salt_data.append(&token1.clone().to_xdr(env));
    salt_data.append(&fee_bps.to_xdr(env));
    env.crypto().sha256(&salt_data).into()
}

/// Address `factory` deploys the `(token_a, token_b, fee_bps)` pool at
pub fn resolve(
    env: &Env,
    factory: &Address,
    token_a: &Address,
    token_b: &Address,
    fee_bps: u32,
) -> Result<Address, ResolveError> {
    let (token0, token1) = sort_tokens(token_a, token_b)?;
    let salt = pool_salt(env, &token0, &token1, fee_bps);
    Ok(env
        .deployer()
        .with_address(factory.clone(), salt)
        .deployed_address())
}
