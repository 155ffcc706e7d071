use soroban_sdk::{contracttype, Address, BytesN};

// ============================================================
// POSITION CONTEXT
// ============================================================

/// Account a trade settles against; supplied by the account layer
/// after it authenticated the owner
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionContext {
    pub account: Address,
    pub owner: Address,
}

// ============================================================
// RESULTS
// ============================================================

/// Settled amounts of one top-level call
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TradeResult {
    pub amount_in: i128,
    pub amount_out: i128,
}

/// Outstanding callback expectation: the pool the engine just called and
/// the hash of the payload it handed over
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingCallback {
    pub pool: Address,
    pub payload_hash: BytesN<32>,
}
