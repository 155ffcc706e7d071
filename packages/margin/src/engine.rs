//! Top-level entry operations

use belugaswap_path::{Deposit, HopAction, PathView, TradeFlag, TradeMode};
use soroban_sdk::{Address, Bytes, Env};

use crate::accountant::AmountAccountant;
use crate::config::EngineConfig;
use crate::error::MarginError;
use crate::events;
use crate::host::Host;
use crate::types::{PendingCallback, PositionContext, TradeResult};

// ============================================================
// ENGINE STATE
// ============================================================

/// Trade being walked by the current top-level call
#[derive(Clone, Debug)]
pub(crate) struct ActiveTrade {
    pub(crate) context: PositionContext,
    pub(crate) view: PathView,
    pub(crate) accountant: AmountAccountant,
}

/// Hop-by-hop settlement engine.
///
/// Holds at most one trade and one callback expectation, and only for the
/// duration of a top-level call. Both are cleared whether the call
/// commits or fails.
#[derive(Clone, Debug)]
pub struct MarginEngine {
    pub(crate) config: EngineConfig,
    pub(crate) pending: Option<PendingCallback>,
    pub(crate) trade: Option<ActiveTrade>,
}

impl MarginEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            pending: None,
            trade: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// No trade running and no callback expected
    pub fn is_idle(&self) -> bool {
        self.trade.is_none() && self.pending.is_none()
    }

    pub(crate) fn accountant_mut(&mut self) -> Result<&mut AmountAccountant, MarginError> {
        self.trade
            .as_mut()
            .map(|trade| &mut trade.accountant)
            .ok_or(MarginError::UnexpectedCallback)
    }

    // ========================================================
    // HEADER-DRIVEN SWAPS
    // ========================================================

    /// Exact-in trade whose amounts lead the path; the flag picks the
    /// funding source and the deposit
    pub fn swap_exact_in<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
    ) -> Result<TradeResult, MarginError> {
        self.header_driven(host, ctx, path, TradeMode::ExactIn)
    }

    /// Exact-out trade whose amounts lead the path
    pub fn swap_exact_out<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
    ) -> Result<TradeResult, MarginError> {
        self.header_driven(host, ctx, path, TradeMode::ExactOut)
    }

    fn header_driven<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        mode: TradeMode,
    ) -> Result<TradeResult, MarginError> {
        let view = PathView::parse(host.env(), path, true)?;
        let amounts = view.amounts().ok_or(MarginError::MissingAmounts)?;
        if view.flag().mode() != mode {
            return Err(MarginError::FlagMismatch);
        }
        self.execute(host, ctx, view, Some(amounts.amount), amounts.bound)
    }

    // ========================================================
    // POSITIONS
    // ========================================================

    /// Borrow `amount_in`, route it, supply the output
    pub fn open_position_exact_in<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_in: i128,
        min_out: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::OpenExactIn, Some(amount_in), min_out)
    }

    /// Borrow what is needed to supply exactly `amount_out`
    pub fn open_position_exact_out<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_out: i128,
        max_in: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::OpenExactOut, Some(amount_out), max_in)
    }

    /// Withdraw `amount_in` collateral, route it, repay debt
    pub fn trim_position_exact_in<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_in: i128,
        min_out: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::TrimExactIn, Some(amount_in), min_out)
    }

    /// Withdraw what is needed to repay exactly `amount_out`
    pub fn trim_position_exact_out<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_out: i128,
        max_in: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::TrimExactOut, Some(amount_out), max_in)
    }

    /// Withdraw the whole collateral balance of the input asset and repay
    pub fn trim_position_all_in<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        min_out: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::TrimAllIn, None, min_out)
    }

    /// Repay the whole debt balance of the output asset from collateral
    pub fn trim_position_all_out<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        max_in: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::TrimAllOut, None, max_in)
    }

    // ========================================================
    // COLLATERAL AND DEBT SWAPS
    // ========================================================

    pub fn collateral_swap_exact_in<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_in: i128,
        min_out: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::CollateralSwapExactIn, Some(amount_in), min_out)
    }

    pub fn collateral_swap_exact_out<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_out: i128,
        max_in: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::CollateralSwapExactOut, Some(amount_out), max_in)
    }

    /// Move the whole collateral balance of the input asset into the output asset
    pub fn collateral_swap_all_in<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        min_out: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::CollateralSwapAllIn, None, min_out)
    }

    pub fn debt_swap_exact_in<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_in: i128,
        min_out: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::DebtSwapExactIn, Some(amount_in), min_out)
    }

    pub fn debt_swap_exact_out<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        amount_out: i128,
        max_in: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::DebtSwapExactOut, Some(amount_out), max_in)
    }

    /// Refinance the whole debt balance of the output asset into the input asset
    pub fn debt_swap_all_out<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        max_in: i128,
    ) -> Result<TradeResult, MarginError> {
        self.named(host, ctx, path, TradeFlag::DebtSwapAllOut, None, max_in)
    }

    fn named<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        path: &Bytes,
        flag: TradeFlag,
        amount: Option<i128>,
        bound: i128,
    ) -> Result<TradeResult, MarginError> {
        let view = PathView::parse(host.env(), path, false)?;
        if view.flag() != flag {
            return Err(MarginError::FlagMismatch);
        }
        self.execute(host, ctx, view, amount, bound)
    }

    // ========================================================
    // EXECUTION
    // ========================================================

    fn execute<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        view: PathView,
        amount: Option<i128>,
        bound: i128,
    ) -> Result<TradeResult, MarginError> {
        if !self.is_idle() {
            return Err(MarginError::TradeInProgress);
        }
        let env = host.env().clone();
        self.validate(&env, &view)?;

        let outcome = host.atomic(|host| self.run(host, ctx, view, amount, bound));

        self.trade = None;
        self.pending = None;
        outcome
    }

    /// Reject a route before any funds move
    fn validate(&self, env: &Env, view: &PathView) -> Result<(), MarginError> {
        let hop_count = view.hop_count();
        if hop_count == 0 {
            return Err(MarginError::EmptyPath);
        }
        if hop_count > self.config.max_hops {
            return Err(MarginError::PathTooLong);
        }

        let funding = view.flag().funding();
        for (index, hop) in view.hops().enumerate() {
            let hop = hop?;
            let expected = if index == 0 { funding } else { HopAction::Swap };
            if hop.action != expected {
                return Err(MarginError::ActionMismatch);
            }
            self.config.venues.resolve(
                env,
                &hop.token_in,
                &hop.token_out,
                hop.fee_bps,
                hop.protocol_id,
            )?;
        }
        Ok(())
    }

    fn run<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &PositionContext,
        view: PathView,
        amount: Option<i128>,
        bound: i128,
    ) -> Result<TradeResult, MarginError> {
        let flag = view.flag();
        let hop_count = view.hop_count();
        let token_out = view.last_token()?;

        let amount = if flag.closes_input() {
            host.collateral_balance(&ctx.account, &view.first_token()?)
        } else if flag.closes_output() {
            host.debt_balance(&ctx.account, &token_out)
        } else {
            amount.ok_or(MarginError::InvalidAmount)?
        };

        self.trade = Some(ActiveTrade {
            context: ctx.clone(),
            view,
            accountant: AmountAccountant::new(flag.mode(), amount, bound)?,
        });

        match flag.mode() {
            TradeMode::ExactIn => {
                let mut running = amount;
                for index in 0..hop_count {
                    running = self.exact_in_hop(host, index, running)?;
                }
                self.accountant_mut()?.check_min_out(running)?;
            }
            TradeMode::ExactOut => {
                self.exact_out_hop(host, hop_count - 1, amount)?;
            }
        }

        let accountant = self.accountant_mut()?;
        if !accountant.is_settled() {
            return Err(MarginError::CallbackNotReceived);
        }
        let result = accountant.result();

        deposit(host, ctx, flag.deposit(), &token_out, result.amount_out)?;
        events::emit_trade_executed(host.env(), &ctx.account, flag, &result);
        Ok(result)
    }
}

/// Place the route's output per the flag's deposit
fn deposit<H: Host>(
    host: &mut H,
    ctx: &PositionContext,
    deposit: Deposit,
    token: &Address,
    amount: i128,
) -> Result<(), MarginError> {
    match deposit {
        Deposit::Transfer => host.transfer(token, &ctx.account, &ctx.owner, amount),
        Deposit::Supply => host.supply(&ctx.account, token, amount),
        Deposit::Repay => {
            let repaid = amount.min(host.debt_balance(&ctx.account, token));
            if repaid > 0 {
                host.repay(&ctx.account, token, repaid)?;
            }
            // output beyond the outstanding debt goes back to the owner
            let excess = amount - repaid;
            if excess > 0 {
                host.transfer(token, &ctx.account, &ctx.owner, excess)?;
            }
            Ok(())
        }
    }
}
