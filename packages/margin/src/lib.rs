#![no_std]

//! # BelugaSwap Margin Engine
//!
//! Chains lending-venue funding, multi-hop pool routing and a terminal
//! lending deposit into one atomic call, with every leg settled inside
//! pool callbacks.
//!
//! ## Flow
//! - Exact-in: walk hops forward, each output funding the next input;
//!   check the minimum output, then deposit.
//! - Exact-out: call the last hop's pool for the exact output; its callback
//!   recurses into the previous hop for the input it owes, down to hop 0,
//!   where the maximum input is checked before anything is funded.
//!
//! ## Entry operations
//! - Header-driven: `swap_exact_in`, `swap_exact_out`
//! - Positions: `open_position_exact_in/out`, `trim_position_exact_in/out`,
//!   `trim_position_all_in/all_out`
//! - Swaps: `collateral_swap_exact_in/out/all_in`, `debt_swap_exact_in/out/all_out`

mod accountant;
mod callback;
mod config;
mod constants;
mod continuation;
mod dispatcher;
mod engine;
mod error;
mod events;
mod host;
mod types;

pub use accountant::AmountAccountant;
pub use config::EngineConfig;
pub use constants::{FEE_HIGH, FEE_LOW, FEE_MEDIUM, MAX_HOPS, NO_PRICE_LIMIT};
pub use continuation::{payload_hash, Continuation};
pub use engine::MarginEngine;
pub use error::MarginError;
pub use host::{Host, LendingVenue, PoolVenue, SwapCallee, TokenLedger};
pub use types::{PendingCallback, PositionContext, TradeResult};
