use soroban_sdk::{contracttype, Address, Vec};

use crate::error::PathError;

// ============================================================
// HOP ACTION
// ============================================================

/// How the input leg of a hop is settled when its pool calls back
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum HopAction {
    /// Funded by the adjacent hop (intermediate hops)
    Swap = 0,
    /// Pulled from the owner's allowance to the account
    Transfer = 1,
    /// Borrowed from the lending venue
    Borrow = 2,
    /// Withdrawn from posted collateral
    Withdraw = 3,
}

impl HopAction {
    pub fn from_code(code: u8) -> Result<Self, PathError> {
        match code {
            0 => Ok(HopAction::Swap),
            1 => Ok(HopAction::Transfer),
            2 => Ok(HopAction::Borrow),
            3 => Ok(HopAction::Withdraw),
            _ => Err(PathError::UnknownAction),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for actions that bring fresh funds into the route
    pub fn is_funding(self) -> bool {
        !matches!(self, HopAction::Swap)
    }
}

// ============================================================
// TRADE MODE / DEPOSIT
// ============================================================

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TradeMode {
    ExactIn = 0,
    ExactOut = 1,
}

/// Where the route's final output goes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Deposit {
    /// Paid out to the owner
    Transfer,
    /// Supplied as collateral
    Supply,
    /// Used to repay debt
    Repay,
}

// ============================================================
// TRADE FLAG
// ============================================================

/// Terminal discriminator selecting the top-level operation
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TradeFlag {
    SwapExactIn = 0,
    SwapExactOut = 1,
    OpenExactIn = 2,
    OpenExactOut = 3,
    TrimExactIn = 4,
    TrimExactOut = 5,
    TrimAllIn = 6,
    TrimAllOut = 7,
    CollateralSwapExactIn = 8,
    CollateralSwapExactOut = 9,
    CollateralSwapAllIn = 10,
    DebtSwapExactIn = 11,
    DebtSwapExactOut = 12,
    DebtSwapAllOut = 13,
}

impl TradeFlag {
    pub fn from_code(code: u8) -> Result<Self, PathError> {
        let flag = match code {
            0 => TradeFlag::SwapExactIn,
            1 => TradeFlag::SwapExactOut,
            2 => TradeFlag::OpenExactIn,
            3 => TradeFlag::OpenExactOut,
            4 => TradeFlag::TrimExactIn,
            5 => TradeFlag::TrimExactOut,
            6 => TradeFlag::TrimAllIn,
            7 => TradeFlag::TrimAllOut,
            8 => TradeFlag::CollateralSwapExactIn,
            9 => TradeFlag::CollateralSwapExactOut,
            10 => TradeFlag::CollateralSwapAllIn,
            11 => TradeFlag::DebtSwapExactIn,
            12 => TradeFlag::DebtSwapExactOut,
            13 => TradeFlag::DebtSwapAllOut,
            _ => return Err(PathError::UnknownFlag),
        };
        Ok(flag)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn mode(self) -> TradeMode {
        match self {
            TradeFlag::SwapExactIn
            | TradeFlag::OpenExactIn
            | TradeFlag::TrimExactIn
            | TradeFlag::TrimAllIn
            | TradeFlag::CollateralSwapExactIn
            | TradeFlag::CollateralSwapAllIn
            | TradeFlag::DebtSwapExactIn => TradeMode::ExactIn,
            _ => TradeMode::ExactOut,
        }
    }

    /// Action the first trade hop must carry
    pub fn funding(self) -> HopAction {
        match self {
            TradeFlag::SwapExactIn | TradeFlag::SwapExactOut => HopAction::Transfer,
            TradeFlag::OpenExactIn
            | TradeFlag::OpenExactOut
            | TradeFlag::DebtSwapExactIn
            | TradeFlag::DebtSwapExactOut
            | TradeFlag::DebtSwapAllOut => HopAction::Borrow,
            _ => HopAction::Withdraw,
        }
    }

    pub fn deposit(self) -> Deposit {
        match self {
            TradeFlag::SwapExactIn | TradeFlag::SwapExactOut => Deposit::Transfer,
            TradeFlag::OpenExactIn
            | TradeFlag::OpenExactOut
            | TradeFlag::CollateralSwapExactIn
            | TradeFlag::CollateralSwapExactOut
            | TradeFlag::CollateralSwapAllIn => Deposit::Supply,
            _ => Deposit::Repay,
        }
    }

    /// Input is the whole collateral balance of the input asset
    pub fn closes_input(self) -> bool {
        matches!(self, TradeFlag::TrimAllIn | TradeFlag::CollateralSwapAllIn)
    }

    /// Output is the whole debt balance of the output asset
    pub fn closes_output(self) -> bool {
        matches!(self, TradeFlag::TrimAllOut | TradeFlag::DebtSwapAllOut)
    }
}

// ============================================================
// PATH
// ============================================================

/// One leg of a route, in trade order
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hop {
    pub token_in: Address,
    pub token_out: Address,
    /// Fee tier in basis points
    pub fee_bps: u32,
    /// Venue selector, resolved against the configured venue table
    pub protocol_id: u32,
    pub action: HopAction,
}

/// Leading amount pair
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Amounts {
    /// Exact input (exact-in) or exact output (exact-out)
    pub amount: i128,
    /// Minimum output (exact-in) or maximum input (exact-out)
    pub bound: i128,
}

/// Fully decoded path
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    pub amounts: Option<Amounts>,
    /// Input asset of the route; the only token of a hop-less path
    pub token_in: Address,
    pub hops: Vec<Hop>,
    pub flag: TradeFlag,
}
