use soroban_sdk::{contracttype, Bytes, Env, Symbol};

/// Selector of every margin operation, in [`MarginCall`] order
pub const SELECTORS: [&str; 14] = [
    "swap_exact_in",
    "swap_exact_out",
    "open_position_exact_in",
    "open_position_exact_out",
    "trim_position_exact_in",
    "trim_position_exact_out",
    "trim_position_all_in",
    "trim_position_all_out",
    "collateral_swap_exact_in",
    "collateral_swap_exact_out",
    "collateral_swap_all_in",
    "debt_swap_exact_in",
    "debt_swap_exact_out",
    "debt_swap_all_out",
];

/// One margin operation with its arguments.
///
/// Exact-in variants take `(path, amount_in, min_out)`, exact-out variants
/// `(path, amount_out, max_in)`, close-all variants `(path, bound)`. The
/// header-driven swaps carry their amounts inside the path.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MarginCall {
    SwapExactIn(Bytes),
    SwapExactOut(Bytes),
    OpenPositionExactIn(Bytes, i128, i128),
    OpenPositionExactOut(Bytes, i128, i128),
    TrimPositionExactIn(Bytes, i128, i128),
    TrimPositionExactOut(Bytes, i128, i128),
    TrimPositionAllIn(Bytes, i128),
    TrimPositionAllOut(Bytes, i128),
    CollateralSwapExactIn(Bytes, i128, i128),
    CollateralSwapExactOut(Bytes, i128, i128),
    CollateralSwapAllIn(Bytes, i128),
    DebtSwapExactIn(Bytes, i128, i128),
    DebtSwapExactOut(Bytes, i128, i128),
    DebtSwapAllOut(Bytes, i128),
}

impl MarginCall {
    fn index(&self) -> usize {
        match self {
            MarginCall::SwapExactIn(..) => 0,
            MarginCall::SwapExactOut(..) => 1,
            MarginCall::OpenPositionExactIn(..) => 2,
            MarginCall::OpenPositionExactOut(..) => 3,
            MarginCall::TrimPositionExactIn(..) => 4,
            MarginCall::TrimPositionExactOut(..) => 5,
            MarginCall::TrimPositionAllIn(..) => 6,
            MarginCall::TrimPositionAllOut(..) => 7,
            MarginCall::CollateralSwapExactIn(..) => 8,
            MarginCall::CollateralSwapExactOut(..) => 9,
            MarginCall::CollateralSwapAllIn(..) => 10,
            MarginCall::DebtSwapExactIn(..) => 11,
            MarginCall::DebtSwapExactOut(..) => 12,
            MarginCall::DebtSwapAllOut(..) => 13,
        }
    }

    /// Registry key of this operation
    pub fn selector(&self, env: &Env) -> Symbol {
        Symbol::new(env, SELECTORS[self.index()])
    }
}
