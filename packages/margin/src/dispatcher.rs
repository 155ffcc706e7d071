//! Hop dispatch
//!
//! Resolves a hop's pool, picks the family's swap primitive, issues the
//! callback expectation and requires the pool to have consumed it before
//! returning.

use belugaswap_path::TradeMode;
use belugaswap_resolver::PoolFamily;
use soroban_sdk::{Address, Bytes, Env};

use crate::constants::NO_PRICE_LIMIT;
use crate::continuation::{payload_hash, Continuation};
use crate::engine::MarginEngine;
use crate::error::MarginError;
use crate::host::Host;
use crate::types::PendingCallback;

/// Everything one pool call needs, cloned out of the active trade
struct HopCall {
    account: Address,
    body: Bytes,
    pool: Address,
    family: PoolFamily,
    zero_for_one: bool,
}

impl HopCall {
    fn payload(&self, env: &Env, index: u32, mode: TradeMode, amount_owed: i128) -> Bytes {
        Continuation {
            account: self.account.clone(),
            path: self.body.clone(),
            hop: index,
            mode,
            amount_owed,
        }
        .to_payload(env)
    }
}

impl MarginEngine {
    fn prepare_hop(&self, env: &Env, index: u32) -> Result<HopCall, MarginError> {
        let trade = self.trade.as_ref().ok_or(MarginError::UnexpectedCallback)?;
        let hop = trade.view.hop(index)?;
        let (pool, family) = self.config.venues.resolve(
            env,
            &hop.token_in,
            &hop.token_out,
            hop.fee_bps,
            hop.protocol_id,
        )?;
        Ok(HopCall {
            account: trade.context.account.clone(),
            body: trade.view.body().clone(),
            zero_for_one: hop.token_in < hop.token_out,
            pool,
            family,
        })
    }

    fn expect(&mut self, env: &Env, pool: &Address, payload: &Bytes) {
        self.pending = Some(PendingCallback {
            pool: pool.clone(),
            payload_hash: payload_hash(env, payload),
        });
    }

    fn ensure_consumed(&mut self) -> Result<(), MarginError> {
        match self.pending.take() {
            Some(_) => Err(MarginError::CallbackNotReceived),
            None => Ok(()),
        }
    }

    /// Swap exactly `amount_in` through hop `index`; returns the output the
    /// account received
    pub(crate) fn exact_in_hop<H: Host>(
        &mut self,
        host: &mut H,
        index: u32,
        amount_in: i128,
    ) -> Result<i128, MarginError> {
        let env = host.env().clone();
        let call = self.prepare_hop(&env, index)?;
        let payload = call.payload(&env, index, TradeMode::ExactIn, amount_in);
        self.expect(&env, &call.pool, &payload);

        let received = match call.family {
            PoolFamily::Concentrated => {
                let (amount0, amount1) = host.clmm_swap(
                    self,
                    &call.pool,
                    &call.account,
                    call.zero_for_one,
                    amount_in,
                    NO_PRICE_LIMIT,
                    &payload,
                )?;
                if call.zero_for_one {
                    -amount1
                } else {
                    -amount0
                }
            }
            PoolFamily::ConstantProduct => {
                let amount_out = host.pair_quote_out(&call.pool, amount_in, call.zero_for_one)?;
                let (amount0_out, amount1_out) = if call.zero_for_one {
                    (0, amount_out)
                } else {
                    (amount_out, 0)
                };
                host.pair_swap(self, &call.pool, amount0_out, amount1_out, &call.account, &payload)?;
                amount_out
            }
        };

        self.ensure_consumed()?;
        if received <= 0 {
            return Err(MarginError::InvalidDelta);
        }
        Ok(received)
    }

    /// Receive exactly `amount_out` from hop `index`; returns the input the
    /// pool charged. The input leg is settled inside the callback, which
    /// recurses into hop `index - 1` for it.
    pub(crate) fn exact_out_hop<H: Host>(
        &mut self,
        host: &mut H,
        index: u32,
        amount_out: i128,
    ) -> Result<i128, MarginError> {
        let env = host.env().clone();
        let call = self.prepare_hop(&env, index)?;

        let amount_in = match call.family {
            PoolFamily::Concentrated => {
                let payload = call.payload(&env, index, TradeMode::ExactOut, 0);
                self.expect(&env, &call.pool, &payload);
                let (amount0, amount1) = host.clmm_swap(
                    self,
                    &call.pool,
                    &call.account,
                    call.zero_for_one,
                    -amount_out,
                    NO_PRICE_LIMIT,
                    &payload,
                )?;
                let (paid, received) = if call.zero_for_one {
                    (amount0, -amount1)
                } else {
                    (amount1, -amount0)
                };
                if received != amount_out {
                    return Err(MarginError::OutputMismatch);
                }
                paid
            }
            PoolFamily::ConstantProduct => {
                let amount_in = host.pair_quote_in(&call.pool, amount_out, call.zero_for_one)?;
                let payload = call.payload(&env, index, TradeMode::ExactOut, amount_in);
                self.expect(&env, &call.pool, &payload);
                let (amount0_out, amount1_out) = if call.zero_for_one {
                    (0, amount_out)
                } else {
                    (amount_out, 0)
                };
                host.pair_swap(self, &call.pool, amount0_out, amount1_out, &call.account, &payload)?;
                amount_in
            }
        };

        self.ensure_consumed()?;
        Ok(amount_in)
    }
}
