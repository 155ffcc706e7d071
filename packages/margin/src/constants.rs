//! Engine constants

/// Longest route a single call may walk
pub const MAX_HOPS: u32 = 6;

/// Sqrt price limit handed to concentrated pools; zero lets the pool use
/// its own bound for the direction
pub const NO_PRICE_LIMIT: u128 = 0;

/// BelugaSwap fee tiers in basis points
pub const FEE_LOW: u32 = 5;
pub const FEE_MEDIUM: u32 = 30;
pub const FEE_HIGH: u32 = 100;
