#![no_std]

//! # BelugaSwap Margin Account
//!
//! Owner-gated front door of a margin position.
//!
//! ## Responsibilities:
//! 1. Reject every call not made by the position owner
//! 2. Route each operation selector to its registered module
//! 3. Hand the engine a `PositionContext` for the account

mod account;
mod calls;
mod events;
mod registry;

pub use account::MarginAccount;
pub use calls::{MarginCall, SELECTORS};
pub use registry::ModuleRegistry;
