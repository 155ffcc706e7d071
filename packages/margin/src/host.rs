//! Collaborator interfaces
//!
//! The engine never owns tokens, lending positions or pools. It reaches
//! them through these traits and pools re-enter it through [`SwapCallee`].

use soroban_sdk::{Address, Bytes, Env};

use crate::error::MarginError;

// ============================================================
// TOKENS
// ============================================================

pub trait TokenLedger {
    fn balance(&self, token: &Address, owner: &Address) -> i128;

    fn transfer(
        &mut self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), MarginError>;

    /// Move `amount` out of `from` against the allowance it granted `spender`
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), MarginError>;
}

// ============================================================
// LENDING VENUE
// ============================================================

/// Money market keyed by `(account, asset)`.
///
/// `borrow` and `withdraw` credit the account's token balance; `supply`
/// and `repay` debit it.
pub trait LendingVenue {
    fn collateral_balance(&self, account: &Address, asset: &Address) -> i128;

    fn debt_balance(&self, account: &Address, asset: &Address) -> i128;

    fn borrow(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError>;

    fn withdraw(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError>;

    fn supply(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError>;

    fn repay(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError>;
}

// ============================================================
// POOLS
// ============================================================

/// Swap primitives of both pool families
pub trait PoolVenue: Sized {
    /// Concentrated liquidity swap.
    ///
    /// `amount_specified > 0` is exact input, `< 0` exact output. The pool
    /// pays `recipient`, then calls `callee.clmm_swap_callback` with the
    /// signed deltas (positive = owed to the pool) and `data` unmodified.
    /// Returns `(amount0_delta, amount1_delta)`.
    fn clmm_swap<C: SwapCallee<Self>>(
        &mut self,
        callee: &mut C,
        pool: &Address,
        recipient: &Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x64: u128,
        data: &Bytes,
    ) -> Result<(i128, i128), MarginError>;

    /// Output the pair pays for `amount_in`, by its own pricing
    fn pair_quote_out(&self, pool: &Address, amount_in: i128, zero_for_one: bool) -> Result<i128, MarginError>;

    /// Input the pair requires for `amount_out`, by its own pricing
    fn pair_quote_in(&self, pool: &Address, amount_out: i128, zero_for_one: bool) -> Result<i128, MarginError>;

    /// Constant product swap: pays the outputs to `to` optimistically, calls
    /// `callee.pair_swap_callback`, then enforces its invariant.
    fn pair_swap<C: SwapCallee<Self>>(
        &mut self,
        callee: &mut C,
        pool: &Address,
        amount0_out: i128,
        amount1_out: i128,
        to: &Address,
        data: &Bytes,
    ) -> Result<(), MarginError>;
}

/// Re-entry points a pool invokes mid-swap
pub trait SwapCallee<H> {
    fn clmm_swap_callback(
        &mut self,
        host: &mut H,
        caller: &Address,
        amount0_delta: i128,
        amount1_delta: i128,
        data: &Bytes,
    ) -> Result<(), MarginError>;

    fn pair_swap_callback(
        &mut self,
        host: &mut H,
        caller: &Address,
        amount0_out: i128,
        amount1_out: i128,
        data: &Bytes,
    ) -> Result<(), MarginError>;
}

// ============================================================
// HOST
// ============================================================

pub trait Host: TokenLedger + LendingVenue + PoolVenue {
    fn env(&self) -> &Env;

    /// Run `f` as one atomic unit; every state change is discarded when it
    /// returns `Err`
    fn atomic<T, F>(&mut self, f: F) -> Result<T, MarginError>
    where
        F: FnOnce(&mut Self) -> Result<T, MarginError>;
}
