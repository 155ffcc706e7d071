use std::collections::BTreeMap;

use soroban_sdk::Address;

// ============================================================
// POOLS
// ============================================================

/// Single-range concentrated liquidity pool
#[derive(Clone, Debug)]
pub struct ClmmPool {
    pub token0: Address,
    pub token1: Address,
    pub fee_bps: u32,
    pub sqrt_price_x64: u128,
    pub liquidity: u128,
    pub locked: bool,
}

/// Constant product pair; reserves are its token balances
#[derive(Clone, Debug)]
pub struct PairPool {
    pub token0: Address,
    pub token1: Address,
    pub fee_bps: u32,
    pub locked: bool,
}

#[derive(Clone, Debug)]
pub enum Pool {
    Concentrated(ClmmPool),
    Pair(PairPool),
}

// ============================================================
// STATE
// ============================================================

/// Everything [`Host::atomic`] snapshots and restores
///
/// [`Host::atomic`]: belugaswap_margin::Host::atomic
#[derive(Clone, Debug, Default)]
pub(crate) struct SimState {
    /// (token, owner) -> balance
    pub balances: BTreeMap<(Address, Address), i128>,
    /// (token, owner, spender) -> allowance
    pub allowances: BTreeMap<(Address, Address, Address), i128>,
    pub pools: BTreeMap<Address, Pool>,
    /// (account, asset) -> collateral
    pub collateral: BTreeMap<(Address, Address), i128>,
    /// (account, asset) -> debt
    pub debt: BTreeMap<(Address, Address), i128>,
}
