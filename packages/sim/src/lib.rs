//! # BelugaSwap Reference Host
//!
//! In-memory implementation of every collaborator the margin engine talks
//! to: a token ledger with allowances, a lending venue with a loan-to-value
//! health check, concentrated and constant-product pools with their real
//! callback shapes, and snapshot rollback for [`Host::atomic`].
//!
//! Pools are registered at the address the resolver derives for them, so
//! the engine's caller authentication runs unmodified against this host.
//!
//! [`Host::atomic`]: belugaswap_margin::Host::atomic

mod host;
mod lending;
mod ledger;
mod math;
mod pools;
mod state;

pub use host::{SimHost, SimHooks, DEFAULT_LTV_BPS};
pub use math::{isqrt, ClmmStep, Q64};
pub use state::{ClmmPool, PairPool, Pool};
