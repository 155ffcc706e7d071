#![no_std]

//! # BelugaSwap Path Codec
//!
//! Fixed-stride binary encoding of multi-hop margin routes.
//!
//! ## Layout
//! `[amount(16) bound(16)]? + (n-1) * [token(32) fee(3) protocol_id(1) action(1)] + [token(32) flag(1)]`
//!
//! No field is length-prefixed. The only structural check is the length
//! invariant `len == header + (n-1) * 37 + 33`.

pub mod codec;
pub mod constants;
pub mod error;
pub mod types;
pub mod view;

pub use codec::{decode, encode, encode_path, with_header, PathBuilder};
pub use constants::{ADDR_SIZE, HEADER_SIZE, HOP_STRIDE, MAX_FEE, TAIL_SIZE};
pub use error::PathError;
pub use types::{Amounts, Deposit, Hop, HopAction, Path, TradeFlag, TradeMode};
pub use view::{hop_count_for, HopIter, PathView};
