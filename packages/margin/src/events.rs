//! Engine events

use belugaswap_path::TradeFlag;
use soroban_sdk::{Address, Env, Symbol};

use crate::types::TradeResult;

/// Emitted when a hop's input leg is paid to its pool
pub fn emit_hop_settled(env: &Env, pool: &Address, hop: u32, token: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "HopSettled"),),
        (pool.clone(), hop, token.clone(), amount),
    );
}

/// Emitted when a top-level call commits
pub fn emit_trade_executed(env: &Env, account: &Address, flag: TradeFlag, result: &TradeResult) {
    env.events().publish(
        (Symbol::new(env, "TradeExecuted"),),
        (account.clone(), flag.code() as u32, result.amount_in, result.amount_out),
    );
}
