//! Running amounts and slippage bounds of one trade

use belugaswap_path::TradeMode;

use crate::error::MarginError;
use crate::types::TradeResult;

/// Tracks the amount known so far against the caller's bound.
///
/// Exact-in: the fixed input is propagated hop by hop and the final output
/// is checked against the minimum. Exact-out: the fixed output is known up
/// front and the input surfaces only at the deepest callback, where it is
/// checked against the maximum before any funds are pulled.
#[derive(Clone, Debug)]
pub struct AmountAccountant {
    mode: TradeMode,
    bound: i128,
    amount_in: i128,
    amount_out: i128,
}

impl AmountAccountant {
    pub fn exact_in(amount_in: i128, min_out: i128) -> Result<Self, MarginError> {
        Self::new(TradeMode::ExactIn, amount_in, min_out)
    }

    pub fn exact_out(amount_out: i128, max_in: i128) -> Result<Self, MarginError> {
        Self::new(TradeMode::ExactOut, amount_out, max_in)
    }

    pub fn new(mode: TradeMode, amount: i128, bound: i128) -> Result<Self, MarginError> {
        if amount <= 0 || bound < 0 {
            return Err(MarginError::InvalidAmount);
        }
        let (amount_in, amount_out) = match mode {
            TradeMode::ExactIn => (amount, 0),
            TradeMode::ExactOut => (0, amount),
        };
        Ok(Self {
            mode,
            bound,
            amount_in,
            amount_out,
        })
    }

    pub fn mode(&self) -> TradeMode {
        self.mode
    }

    pub fn bound(&self) -> i128 {
        self.bound
    }

    pub fn amount_in(&self) -> i128 {
        self.amount_in
    }

    pub fn amount_out(&self) -> i128 {
        self.amount_out
    }

    /// Record the final output of an exact-in walk
    pub fn check_min_out(&mut self, amount_out: i128) -> Result<(), MarginError> {
        if self.mode != TradeMode::ExactIn {
            return Err(MarginError::InvalidAmount);
        }
        if amount_out < self.bound {
            return Err(MarginError::TooLittleReceived);
        }
        self.amount_out = amount_out;
        Ok(())
    }

    /// Record the input the first hop requires in an exact-out walk
    pub fn check_max_in(&mut self, amount_in: i128) -> Result<(), MarginError> {
        if self.mode != TradeMode::ExactOut {
            return Err(MarginError::InvalidAmount);
        }
        if amount_in <= 0 {
            return Err(MarginError::InvalidDelta);
        }
        if amount_in > self.bound {
            return Err(MarginError::TooMuchRequested);
        }
        self.amount_in = amount_in;
        Ok(())
    }

    /// True once both sides are known
    pub fn is_settled(&self) -> bool {
        self.amount_in > 0 && self.amount_out > 0
    }

    pub fn result(&self) -> TradeResult {
        TradeResult {
            amount_in: self.amount_in,
            amount_out: self.amount_out,
        }
    }
}
