use std::fmt;

use belugaswap_margin::{Host, MarginError};
use belugaswap_resolver::{resolve, sort_tokens, PoolFamily};
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env};

use crate::math::clmm_from_reserves;
use crate::state::{ClmmPool, PairPool, Pool, SimState};

/// Loan-to-value the lending venue allows, in basis points
pub const DEFAULT_LTV_BPS: i128 = 8_000;

/// Misbehaviour switches for pools
#[derive(Clone, Debug, Default)]
pub struct SimHooks {
    /// Pools report this address as the callback caller
    pub impersonate: Option<Address>,
    /// Pools flip a byte of the payload before echoing it
    pub tamper_payload: bool,
    /// Pools return without calling back; concentrated pools also skip their input check
    pub skip_callback: bool,
    /// Concentrated pools ask for this much more input than their price requires
    pub overcharge: i128,
}

/// In-memory host
#[derive(Clone)]
pub struct SimHost {
    pub(crate) env: Env,
    pub(crate) state: SimState,
    pub(crate) reserve: Address,
    pub(crate) ltv_bps: i128,
    pub hooks: SimHooks,
}

impl fmt::Debug for SimHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimHost")
            .field("state", &self.state)
            .field("reserve", &self.reserve)
            .field("ltv_bps", &self.ltv_bps)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl SimHost {
    pub fn new(env: &Env) -> Self {
        Self {
            env: env.clone(),
            state: SimState::default(),
            reserve: Address::generate(env),
            ltv_bps: DEFAULT_LTV_BPS,
            hooks: SimHooks::default(),
        }
    }

    pub fn with_ltv(mut self, ltv_bps: i128) -> Self {
        self.ltv_bps = ltv_bps;
        self
    }

    /// Account holding the lending venue's liquidity
    pub fn lending_reserve(&self) -> &Address {
        &self.reserve
    }

    // ========================================================
    // SETUP
    // ========================================================

    pub fn mint(&mut self, token: &Address, to: &Address, amount: i128) {
        *self
            .state
            .balances
            .entry((token.clone(), to.clone()))
            .or_insert(0) += amount;
    }

    pub fn approve(&mut self, token: &Address, owner: &Address, spender: &Address, amount: i128) {
        self.state
            .allowances
            .insert((token.clone(), owner.clone(), spender.clone()), amount);
    }

    pub fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> i128 {
        self.state
            .allowances
            .get(&(token.clone(), owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Give the lending venue `amount` of `asset` to lend out
    pub fn fund_lending(&mut self, asset: &Address, amount: i128) {
        let reserve = self.reserve.clone();
        self.mint(asset, &reserve, amount);
    }

    /// Post collateral for `account` without touching its wallet
    pub fn seed_collateral(&mut self, account: &Address, asset: &Address, amount: i128) {
        self.fund_lending(asset, amount);
        *self
            .state
            .collateral
            .entry((account.clone(), asset.clone()))
            .or_insert(0) += amount;
    }

    /// Record debt for `account` without touching its wallet
    pub fn seed_debt(&mut self, account: &Address, asset: &Address, amount: i128) {
        *self
            .state
            .debt
            .entry((account.clone(), asset.clone()))
            .or_insert(0) += amount;
    }

    /// Deploy a pool at the address `factory` derives for the pair and
    /// fund it with the given reserves
    pub fn create_pool(
        &mut self,
        family: PoolFamily,
        factory: &Address,
        token_a: &Address,
        amount_a: i128,
        token_b: &Address,
        amount_b: i128,
        fee_bps: u32,
    ) -> Result<Address, MarginError> {
        let (token0, token1) = sort_tokens(token_a, token_b)?;
        let (reserve0, reserve1) = if *token_a == token0 {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        let address = resolve(&self.env, factory, &token0, &token1, fee_bps)?;

        let pool = match family {
            PoolFamily::Concentrated => {
                let (liquidity, sqrt_price_x64) = clmm_from_reserves(reserve0, reserve1)?;
                Pool::Concentrated(ClmmPool {
                    token0: token0.clone(),
                    token1: token1.clone(),
                    fee_bps,
                    sqrt_price_x64,
                    liquidity,
                    locked: false,
                })
            }
            PoolFamily::ConstantProduct => Pool::Pair(PairPool {
                token0: token0.clone(),
                token1: token1.clone(),
                fee_bps,
                locked: false,
            }),
        };

        self.state.pools.insert(address.clone(), pool);
        self.mint(&token0, &address, reserve0);
        self.mint(&token1, &address, reserve1);
        Ok(address)
    }

    pub fn pool(&self, address: &Address) -> Option<&Pool> {
        self.state.pools.get(address)
    }

    // ========================================================
    // HOOKS
    // ========================================================

    pub(crate) fn callback_caller(&self, pool: &Address) -> Address {
        self.hooks.impersonate.clone().unwrap_or_else(|| pool.clone())
    }

    pub(crate) fn echoed_payload(&self, data: &Bytes) -> Bytes {
        let mut echoed = data.clone();
        if self.hooks.tamper_payload && !echoed.is_empty() {
            let last = echoed.len() - 1;
            let byte = echoed.get(last).unwrap_or(0);
            echoed.set(last, byte ^ 0xFF);
        }
        echoed
    }
}

impl Host for SimHost {
    fn env(&self) -> &Env {
        &self.env
    }

    fn atomic<T, F>(&mut self, f: F) -> Result<T, MarginError>
    where
        F: FnOnce(&mut Self) -> Result<T, MarginError>,
    {
        let snapshot = self.state.clone();
        let outcome = f(self);
        if outcome.is_err() {
            self.state = snapshot;
        }
        outcome
    }
}
