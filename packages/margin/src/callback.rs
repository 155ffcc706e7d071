//! Pool callback handling
//!
//! Callbacks are public re-entry points. Every invocation is checked, in
//! order: an expectation is outstanding, the payload is byte-for-byte the
//! one issued, it belongs to the active account, and the caller is the pool
//! the resolver derives from the payload's own hop. Only then are funds
//! moved.

use belugaswap_path::{Hop, HopAction, PathView, TradeMode};
use belugaswap_resolver::PoolFamily;
use soroban_sdk::{Address, Bytes, Env};

use crate::continuation::{payload_hash, Continuation};
use crate::engine::MarginEngine;
use crate::error::MarginError;
use crate::events;
use crate::host::{Host, SwapCallee};

impl<H: Host> SwapCallee<H> for MarginEngine {
    fn clmm_swap_callback(
        &mut self,
        host: &mut H,
        caller: &Address,
        amount0_delta: i128,
        amount1_delta: i128,
        data: &Bytes,
    ) -> Result<(), MarginError> {
        let env = host.env().clone();
        let (continuation, hop) = self.accept(&env, caller, PoolFamily::Concentrated, data)?;

        let (owed, paid_out) = if hop.token_in < hop.token_out {
            (amount0_delta, amount1_delta)
        } else {
            (amount1_delta, amount0_delta)
        };
        if owed <= 0 || paid_out > 0 {
            return Err(MarginError::InvalidDelta);
        }
        // exact-in never funds more than the amount the hop was given
        if continuation.mode == TradeMode::ExactIn && owed > continuation.amount_owed {
            return Err(MarginError::InvalidDelta);
        }

        self.settle(host, caller, &continuation, &hop, owed)
    }

    fn pair_swap_callback(
        &mut self,
        host: &mut H,
        caller: &Address,
        amount0_out: i128,
        amount1_out: i128,
        data: &Bytes,
    ) -> Result<(), MarginError> {
        let env = host.env().clone();
        let (continuation, hop) = self.accept(&env, caller, PoolFamily::ConstantProduct, data)?;

        let (out, other) = if hop.token_in < hop.token_out {
            (amount1_out, amount0_out)
        } else {
            (amount0_out, amount1_out)
        };
        if out <= 0 || other != 0 || continuation.amount_owed <= 0 {
            return Err(MarginError::InvalidDelta);
        }

        let owed = continuation.amount_owed;
        self.settle(host, caller, &continuation, &hop, owed)
    }
}

impl MarginEngine {
    /// Authenticate a callback and consume the expectation it answers
    fn accept(
        &mut self,
        env: &Env,
        caller: &Address,
        family: PoolFamily,
        data: &Bytes,
    ) -> Result<(Continuation, Hop), MarginError> {
        let pending = self.pending.as_ref().ok_or(MarginError::UnexpectedCallback)?;
        if payload_hash(env, data) != pending.payload_hash {
            return Err(MarginError::UnexpectedCallback);
        }

        let continuation = Continuation::from_payload(env, data)?;
        let trade = self.trade.as_ref().ok_or(MarginError::UnexpectedCallback)?;
        if continuation.account != trade.context.account {
            return Err(MarginError::ForeignAccount);
        }

        let view = PathView::parse(env, &continuation.path, false)?;
        let hop = view.hop(continuation.hop)?;
        let (pool, pool_family) = self.config.venues.resolve(
            env,
            &hop.token_in,
            &hop.token_out,
            hop.fee_bps,
            hop.protocol_id,
        )?;
        if pool != *caller || pool != pending.pool {
            return Err(MarginError::InvalidCallbackCaller);
        }
        if pool_family != family {
            return Err(MarginError::UnexpectedCallback);
        }

        self.pending = None;
        Ok((continuation, hop))
    }

    /// Make `owed` of the hop's input available to the account, then pay
    /// the calling pool
    fn settle<H: Host>(
        &mut self,
        host: &mut H,
        caller: &Address,
        continuation: &Continuation,
        hop: &Hop,
        owed: i128,
    ) -> Result<(), MarginError> {
        let owner = self
            .trade
            .as_ref()
            .map(|trade| trade.context.owner.clone())
            .ok_or(MarginError::UnexpectedCallback)?;
        let account = &continuation.account;

        match continuation.mode {
            TradeMode::ExactIn => fund(host, account, &owner, hop.action, &hop.token_in, owed)?,
            TradeMode::ExactOut if continuation.hop > 0 => {
                self.exact_out_hop(host, continuation.hop - 1, owed)?;
            }
            TradeMode::ExactOut => {
                // bound is checked before the first funding transfer
                self.accountant_mut()?.check_max_in(owed)?;
                fund(host, account, &owner, hop.action, &hop.token_in, owed)?;
            }
        }

        host.transfer(&hop.token_in, account, caller, owed)?;
        events::emit_hop_settled(host.env(), caller, continuation.hop, &hop.token_in, owed);
        Ok(())
    }
}

/// Bring `amount` of `token` into the account per the hop's action
fn fund<H: Host>(
    host: &mut H,
    account: &Address,
    owner: &Address,
    action: HopAction,
    token: &Address,
    amount: i128,
) -> Result<(), MarginError> {
    match action {
        HopAction::Swap => Ok(()),
        HopAction::Transfer => host.transfer_from(token, account, owner, account, amount),
        HopAction::Borrow => host.borrow(account, token, amount),
        HopAction::Withdraw => host.withdraw(account, token, amount),
    }
}
