use belugaswap_margin::{MarginError, PoolVenue, SwapCallee, TokenLedger};
use soroban_sdk::{Address, Bytes};

use crate::host::SimHost;
use crate::math::{clmm_swap_step, pair_amount_in, pair_amount_out, pair_invariant_holds};
use crate::state::{ClmmPool, PairPool, Pool};

impl SimHost {
    fn clmm_pool(&self, pool: &Address) -> Result<ClmmPool, MarginError> {
        match self.state.pools.get(pool) {
            Some(Pool::Concentrated(state)) => Ok(state.clone()),
            _ => Err(MarginError::PoolNotFound),
        }
    }

    fn pair_pool(&self, pool: &Address) -> Result<PairPool, MarginError> {
        match self.state.pools.get(pool) {
            Some(Pool::Pair(state)) => Ok(state.clone()),
            _ => Err(MarginError::PoolNotFound),
        }
    }

    fn set_locked(&mut self, pool: &Address, locked: bool) {
        match self.state.pools.get_mut(pool) {
            Some(Pool::Concentrated(state)) => state.locked = locked,
            Some(Pool::Pair(state)) => state.locked = locked,
            None => {}
        }
    }

    fn pair_reserves(&self, pool: &Address, state: &PairPool) -> (i128, i128) {
        (
            self.balance(&state.token0, pool),
            self.balance(&state.token1, pool),
        )
    }

    /// `(reserve_in, reserve_out)` for a direction
    fn pair_reserves_for(&self, pool: &Address, zero_for_one: bool) -> Result<(i128, i128, u32), MarginError> {
        let state = self.pair_pool(pool)?;
        let (reserve0, reserve1) = self.pair_reserves(pool, &state);
        if zero_for_one {
            Ok((reserve0, reserve1, state.fee_bps))
        } else {
            Ok((reserve1, reserve0, state.fee_bps))
        }
    }
}

impl PoolVenue for SimHost {
    fn clmm_swap<C: SwapCallee<Self>>(
        &mut self,
        callee: &mut C,
        pool: &Address,
        recipient: &Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x64: u128,
        data: &Bytes,
    ) -> Result<(i128, i128), MarginError> {
        let state = self.clmm_pool(pool)?;
        if state.locked {
            return Err(MarginError::PoolLocked);
        }

        let step = clmm_swap_step(
            &self.env,
            state.sqrt_price_x64,
            state.liquidity,
            state.fee_bps,
            zero_for_one,
            amount_specified,
        )?;
        if sqrt_price_limit_x64 != 0 {
            let crossed = if zero_for_one {
                step.sqrt_price_next < sqrt_price_limit_x64
            } else {
                step.sqrt_price_next > sqrt_price_limit_x64
            };
            if crossed {
                return Err(MarginError::PriceLimitReached);
            }
        }

        let (token_in, token_out) = if zero_for_one {
            (state.token0.clone(), state.token1.clone())
        } else {
            (state.token1.clone(), state.token0.clone())
        };
        let charged = step
            .amount_in
            .checked_add(self.hooks.overcharge)
            .ok_or(MarginError::Overflow)?;
        let deltas = if zero_for_one {
            (charged, -step.amount_out)
        } else {
            (-step.amount_out, charged)
        };

        if let Some(Pool::Concentrated(live)) = self.state.pools.get_mut(pool) {
            live.sqrt_price_x64 = step.sqrt_price_next;
            live.locked = true;
        }
        self.transfer(&token_out, pool, recipient, step.amount_out)?;

        if !self.hooks.skip_callback {
            let expected = self
                .balance(&token_in, pool)
                .checked_add(charged)
                .ok_or(MarginError::Overflow)?;
            let caller = self.callback_caller(pool);
            let echoed = self.echoed_payload(data);
            callee.clmm_swap_callback(self, &caller, deltas.0, deltas.1, &echoed)?;
            if self.balance(&token_in, pool) < expected {
                return Err(MarginError::InsufficientInput);
            }
        }

        self.set_locked(pool, false);
        Ok(deltas)
    }

    fn pair_quote_out(&self, pool: &Address, amount_in: i128, zero_for_one: bool) -> Result<i128, MarginError> {
        let (reserve_in, reserve_out, fee_bps) = self.pair_reserves_for(pool, zero_for_one)?;
        pair_amount_out(amount_in, reserve_in, reserve_out, fee_bps)
    }

    fn pair_quote_in(&self, pool: &Address, amount_out: i128, zero_for_one: bool) -> Result<i128, MarginError> {
        let (reserve_in, reserve_out, fee_bps) = self.pair_reserves_for(pool, zero_for_one)?;
        pair_amount_in(amount_out, reserve_in, reserve_out, fee_bps)
    }

    fn pair_swap<C: SwapCallee<Self>>(
        &mut self,
        callee: &mut C,
        pool: &Address,
        amount0_out: i128,
        amount1_out: i128,
        to: &Address,
        data: &Bytes,
    ) -> Result<(), MarginError> {
        let state = self.pair_pool(pool)?;
        if state.locked {
            return Err(MarginError::PoolLocked);
        }
        if amount0_out < 0 || amount1_out < 0 || (amount0_out == 0 && amount1_out == 0) {
            return Err(MarginError::InvalidAmount);
        }
        let (reserve0, reserve1) = self.pair_reserves(pool, &state);
        if amount0_out >= reserve0 || amount1_out >= reserve1 {
            return Err(MarginError::InsufficientLiquidity);
        }

        self.set_locked(pool, true);
        self.transfer(&state.token0, pool, to, amount0_out)?;
        self.transfer(&state.token1, pool, to, amount1_out)?;

        if !self.hooks.skip_callback {
            let caller = self.callback_caller(pool);
            let echoed = self.echoed_payload(data);
            callee.pair_swap_callback(self, &caller, amount0_out, amount1_out, &echoed)?;
        }

        let (balance0, balance1) = self.pair_reserves(pool, &state);
        let amount0_in = (balance0 - (reserve0 - amount0_out)).max(0);
        let amount1_in = (balance1 - (reserve1 - amount1_out)).max(0);
        if amount0_in == 0 && amount1_in == 0 {
            return Err(MarginError::InsufficientInput);
        }
        if !pair_invariant_holds(
            balance0,
            balance1,
            amount0_in,
            amount1_in,
            reserve0,
            reserve1,
            state.fee_bps,
        )? {
            return Err(MarginError::InvariantViolated);
        }

        self.set_locked(pool, false);
        Ok(())
    }
}
